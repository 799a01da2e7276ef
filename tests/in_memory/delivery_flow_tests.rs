//! End-to-end delivery through in-memory backends.

use super::helpers::{CHAIN, Host, host, mail, settings};
use mockable::DefaultClock;
use postbox::delivery::{
    domain::{DeliveryMethodName, MailMessage},
    ports::DeliveryMethodError,
    services::{
        ChainFilter, DeliveryAdapter, DeliveryConfig, DeliveryError, DeliverySettings,
        InvalidFactoryReason, Mailer,
    },
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn delivers_through_factory_with_encoded_content(host: Host) {
    let adapter = host.adapter(settings(None)).expect("adapter builds");
    let message = mail();

    adapter.deliver(&message).expect("delivery succeeds");

    let records = host.records.records().expect("records readable");
    assert_eq!(records.len(), 1);
    let fields = records[0].fields();
    assert_eq!(fields.from, "someone@somewhere.com");
    assert_eq!(fields.to, "foo@bar.com");
    assert_eq!(fields.subject, "hey");
    assert_eq!(fields.content, message.encoded());
}

#[rstest]
fn creates_extra_record_for_each_recipient_and_sender(host: Host) {
    let adapter = host.adapter(settings(None)).expect("adapter builds");
    let message = MailMessage::builder()
        .from("someone@somewhere.com")
        .from("radek@paviensky.com")
        .to("foo@bar.com")
        .to("radek@paviensky.com")
        .subject("hey")
        .build(&DefaultClock);

    adapter.deliver(&message).expect("delivery succeeds");

    let pair = |from: &str, to: &str| (from.to_owned(), to.to_owned());
    assert_eq!(
        host.persisted_pairs(),
        [
            pair("someone@somewhere.com", "foo@bar.com"),
            pair("someone@somewhere.com", "radek@paviensky.com"),
            pair("radek@paviensky.com", "foo@bar.com"),
            pair("radek@paviensky.com", "radek@paviensky.com"),
        ]
    );
}

#[rstest]
fn chains_to_configured_delivery_method(host: Host) {
    let adapter = host.adapter(settings(Some(CHAIN))).expect("adapter builds");
    let message = mail();

    adapter.deliver(&message).expect("delivery succeeds");

    assert_eq!(host.persisted_pairs().len(), 1);
    let chained = host.mailbox.deliveries().expect("mailbox readable");
    assert_eq!(chained, [message]);
}

#[rstest]
fn declined_message_is_persisted_but_not_chained(host: Host) {
    let config = DeliveryConfig::from_settings(settings(Some(CHAIN)))
        .expect("valid settings")
        .with_chain_filter(ChainFilter::new(|_| false));
    let adapter = DeliveryAdapter::new(
        config,
        Arc::clone(&host.factories),
        &host.methods,
    )
    .expect("adapter builds");

    adapter.deliver(&mail()).expect("delivery succeeds");

    assert_eq!(host.persisted_pairs().len(), 1);
    assert_eq!(host.chained_count(), 0);
}

#[rstest]
fn unknown_factory_is_reported_and_nothing_is_chained(host: Host) {
    let adapter = host
        .adapter(DeliverySettings {
            factory: Some("FooBar".to_owned()),
            chain_delivery_method: Some(CHAIN.to_owned()),
        })
        .expect("adapter builds");

    let result = adapter.deliver(&mail());

    assert!(matches!(
        result,
        Err(DeliveryError::InvalidFactory {
            reason: InvalidFactoryReason::Unknown,
            ..
        })
    ));
    assert_eq!(host.chained_count(), 0);
}

#[rstest]
fn missing_factory_is_rejected_when_building(host: Host) {
    let result = host.adapter(DeliverySettings::default_options());

    assert!(result.is_err());
}

#[rstest]
#[case::raising(true)]
#[case::suppressing(false)]
fn invalid_recipient_respects_host_error_policy(host: Host, #[case] raise: bool) {
    let adapter = host.adapter(settings(None)).expect("adapter builds");
    let mailer = Mailer::new(Arc::new(adapter)).raise_delivery_errors(raise);
    let message = MailMessage::builder()
        .from("someone@somewhere.com")
        .to("Foo Bar <foo@bar / bar@bar.com>")
        .build(&DefaultClock);

    let result = mailer.deliver(&message);

    if raise {
        assert!(matches!(result, Err(DeliveryMethodError::Rejected(_))));
    } else {
        assert!(result.is_ok());
    }
    assert!(host.persisted_pairs().is_empty());
}

#[rstest]
fn mailer_resolves_plain_delivery_methods(host: Host) {
    let name = DeliveryMethodName::new(CHAIN).expect("valid name");
    let mailer = Mailer::from_registry(&host.methods, &name).expect("method registered");

    mailer.deliver(&mail()).expect("delivery succeeds");

    assert_eq!(host.chained_count(), 1);
    assert!(host.persisted_pairs().is_empty());
}
