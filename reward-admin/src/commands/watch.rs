use reward_client::{AdminClient, SpinEvent};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

/// Print spin events until Ctrl+C
pub async fn run(client: &AdminClient, interval: Duration) -> anyhow::Result<()> {
    let watcher = client.watcher(interval);
    let mut events = watcher.subscribe();
    let cancel = CancellationToken::new();

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    println!("Watching spins every {} ms, Ctrl+C to stop", interval.as_millis());

    let printer = async {
        loop {
            match events.recv().await {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Spin events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    tokio::select! {
        _ = watcher.run(cancel.clone()) => {}
        _ = printer => {}
    }
    Ok(())
}

fn print_event(event: &SpinEvent) {
    match event {
        SpinEvent::Started {
            reward_id,
            title,
            audience,
            ..
        } => println!("▶ {title} ({reward_id}) spinning, {} participants", audience.len()),
        SpinEvent::Completed {
            reward_id,
            title,
            winner,
        } => println!("★ {title} ({reward_id}) won by {} ({})", winner.name, winner.mobile),
        SpinEvent::Reset { reward_id } => println!("↺ {reward_id} reset"),
        SpinEvent::Removed { reward_id } => println!("✗ {reward_id} deleted"),
    }
}
