use reward_client::{AdminClient, CategoryForm, Confirm};

use super::{CategoryAction, loaded};

pub async fn run(
    client: &AdminClient,
    action: CategoryAction,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    match action {
        CategoryAction::List => {
            let categories = loaded(client.categories.refresh().await)?;
            if categories.is_empty() {
                println!("No categories yet.");
            }
            for category in categories {
                println!(
                    "{:<34} {:<30} {}",
                    category.id,
                    category.name,
                    category.created_at.format("%Y-%m-%d")
                );
            }
        }
        CategoryAction::Create { name } => {
            let mut form = CategoryForm::new(name);
            client.categories.create_category(&mut form).await?;
        }
        CategoryAction::Delete { id } => {
            loaded(client.categories.refresh().await)?;
            client.categories.delete_category(&id, confirm).await?;
        }
    }
    Ok(())
}
