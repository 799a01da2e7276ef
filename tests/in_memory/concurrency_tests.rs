//! Parallel deliveries sharing one adapter.

use super::helpers::{CHAIN, Host, host, settings};
use mockable::DefaultClock;
use postbox::delivery::domain::MailMessage;
use rstest::rstest;
use std::collections::BTreeSet;
use std::thread;

#[rstest]
fn parallel_deliveries_persist_every_record(host: Host) {
    let adapter = host.adapter(settings(Some(CHAIN))).expect("adapter builds");
    let workers = 8_usize;

    thread::scope(|scope| {
        for worker in 0..workers {
            let shared = &adapter;
            scope.spawn(move || {
                let message = MailMessage::builder()
                    .from(&format!("sender{worker}@x.org"))
                    .to("a@x.org, b@x.org")
                    .subject(format!("worker {worker}"))
                    .build(&DefaultClock);
                shared.deliver(&message).expect("delivery succeeds");
            });
        }
    });

    let pairs = host.persisted_pairs();
    assert_eq!(pairs.len(), workers * 2);
    let senders: BTreeSet<String> = pairs.into_iter().map(|(from, _)| from).collect();
    assert_eq!(senders.len(), workers);
    assert_eq!(host.chained_count(), workers);
}
