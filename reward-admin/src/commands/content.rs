use reward_client::{AdminClient, Confirm, ContentDraft, ContentKind};

use super::{ContentAction, loaded};

pub async fn run(
    client: &AdminClient,
    kind: ContentKind,
    action: ContentAction,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    let manager = client.content(kind);

    match action {
        ContentAction::List {
            query,
            visible_only,
        } => {
            loaded(manager.refresh().await)?;
            let items = manager.filter(&query, visible_only);
            if items.is_empty() {
                println!("No {kind} items match.");
            }
            for item in items {
                println!(
                    "{:<34} {:<40} {:<7} ♥ {:<5} ↗ {}",
                    item.id,
                    item.title,
                    if item.is_visible { "visible" } else { "hidden" },
                    item.likes,
                    item.shares
                );
            }
        }
        ContentAction::Create {
            title,
            body,
            image_url,
            link,
        } => {
            let draft = ContentDraft {
                title,
                body,
                image_url,
                link,
            };
            manager.create(&draft).await?;
        }
        ContentAction::Visibility { id } => manager.toggle_visibility(&id).await?,
        ContentAction::Like { id } => {
            loaded(manager.refresh().await)?;
            let likes = manager.like(&id).await?;
            println!("{likes} likes");
        }
        ContentAction::Share { id } => {
            loaded(manager.refresh().await)?;
            let shares = manager.share(&id).await?;
            println!("{shares} shares");
        }
        ContentAction::Delete { id } => manager.delete(&id, confirm).await?,
    }
    Ok(())
}
