use anyhow::{Context, bail};
use reward_client::{AdminClient, ClientConfig, Confirm, DashboardRow, RewardForm, RigSelection};
use std::path::Path;

use super::{RewardAction, loaded};

pub async fn run(
    client: &AdminClient,
    config: &ClientConfig,
    action: RewardAction,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    match action {
        RewardAction::List => {
            loaded(client.rewards.refresh().await)?;
            let rows = client.rewards.dashboard();
            if rows.is_empty() {
                println!("No reward sessions yet.");
            }
            for row in &rows {
                print_row(row);
            }
        }
        RewardAction::Create {
            title,
            description,
            banner_url,
            banner_file,
            button_text,
            button_link,
            category,
            participants,
        } => {
            let mut form = RewardForm::new();
            form.title = title;
            form.description = description;
            form.banner_url = banner_url;
            form.button_text = button_text;
            form.button_link = button_link;
            form.category_id = category;

            form.set_audience_count(participants.len());
            for (slot, entry) in participants.iter().enumerate() {
                let (name, mobile) = parse_participant(entry)?;
                form.set_participant(slot, name, mobile);
            }

            if let Some(path) = banner_file {
                upload_banner(client, config, &mut form, &path).await?;
            }

            client.rewards.create_reward(&mut form).await?;
        }
        RewardAction::Rig { id, target } => {
            let selection = parse_rig_target(&target)?;
            client.rewards.update_rigged_index(&id, selection).await?;
        }
        RewardAction::Run { id } => client.rewards.trigger_spin(&id).await?,
        RewardAction::Reset { id } => client.rewards.reset_spin(&id).await?,
        RewardAction::Delete { id } => {
            loaded(client.rewards.refresh().await)?;
            client.rewards.delete_reward(&id, confirm).await?;
        }
    }
    Ok(())
}

async fn upload_banner(
    client: &AdminClient,
    config: &ClientConfig,
    form: &mut RewardForm,
    path: &Path,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Banner file needs a UTF-8 file name")?;

    let uploader = client
        .media(config.media.clone())
        .map_err(|e| anyhow::anyhow!("Banner upload unavailable: {e}"))?;
    uploader.upload_banner(form, file_name, bytes).await?;
    Ok(())
}

/// `NAME:MOBILE`; the mobile is everything after the last colon
fn parse_participant(entry: &str) -> anyhow::Result<(&str, &str)> {
    match entry.rsplit_once(':') {
        Some((name, mobile)) => Ok((name.trim(), mobile.trim())),
        None => bail!("Participant must look like NAME:MOBILE, got {entry:?}"),
    }
}

/// "random" or a 1-based participant number
fn parse_rig_target(target: &str) -> anyhow::Result<RigSelection> {
    if target.eq_ignore_ascii_case("random") {
        return Ok(RigSelection::Random);
    }
    match target.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(RigSelection::Participant(number - 1)),
        _ => bail!("Rig target must be \"random\" or a participant number, got {target:?}"),
    }
}

fn print_row(row: &DashboardRow) {
    let state = match (&row.winner, row.triggered_at) {
        (Some(winner), _) => format!("won by {} ({})", winner.name, winner.mobile),
        (None, Some(at)) => format!("spinning since {}", at.format("%H:%M:%S")),
        (None, None) => "ready".to_string(),
    };
    println!(
        "{:<34} {:<30} {:<9} [{}] {}",
        row.id,
        row.title,
        format!("{:?}", row.status).to_lowercase(),
        row.action.label(),
        state
    );
    if row.shows_rig_selector() {
        for (number, option) in row.rig_options.iter().enumerate() {
            let marker = if option.selected { "*" } else { " " };
            let key = if number == 0 {
                "random".to_string()
            } else {
                number.to_string()
            };
            println!("    {marker} {key:>6}  {}", option.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_participant() {
        assert_eq!(parse_participant("Asha Rao:9000000001").unwrap(), ("Asha Rao", "9000000001"));
        assert_eq!(parse_participant("A:B: 123").unwrap(), ("A:B", "123"));
        assert!(parse_participant("no mobile").is_err());
    }

    #[test]
    fn test_parse_rig_target() {
        assert_eq!(parse_rig_target("Random").unwrap(), RigSelection::Random);
        assert_eq!(parse_rig_target("3").unwrap(), RigSelection::Participant(2));
        assert!(parse_rig_target("0").is_err());
        assert!(parse_rig_target("first").is_err());
    }
}
