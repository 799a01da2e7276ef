//! Given steps for mail delivery BDD scenarios.

use super::world::DeliveryWorld;
use postbox::delivery::{domain::MailMessage, services::ChainFilter};
use rstest_bdd_macros::given;

#[given(r#"a message from "{from}" to "{to}" with subject "{subject}""#)]
fn a_message(world: &mut DeliveryWorld, from: String, to: String, subject: String) {
    world.pending = Some(MailMessage::builder().from(&from).to(&to).subject(subject));
}

#[given(r#"a message from "{from}" without recipients with subject "{subject}""#)]
fn a_message_without_recipients(world: &mut DeliveryWorld, from: String, subject: String) {
    world.pending = Some(MailMessage::builder().from(&from).subject(subject));
}

#[given(r#"the message is blind copied to "{bcc}""#)]
fn blind_copied(world: &mut DeliveryWorld, bcc: String) -> Result<(), eyre::Report> {
    let builder = world
        .pending
        .take()
        .ok_or_else(|| eyre::eyre!("no pending message in scenario world"))?;
    world.pending = Some(builder.bcc(&bcc));
    Ok(())
}

#[given("delivery is chained to the test mailbox")]
fn chained_to_mailbox(world: &mut DeliveryWorld) {
    world.chained = true;
}

#[given("the chain filter declines every message")]
fn filter_declines(world: &mut DeliveryWorld) {
    world.filter = ChainFilter::new(|_| false);
}
