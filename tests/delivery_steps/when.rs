//! When steps for mail delivery BDD scenarios.

use super::world::DeliveryWorld;
use mockable::DefaultClock;
use rstest_bdd_macros::when;

#[when("the message is delivered")]
fn deliver_message(world: &mut DeliveryWorld) -> Result<(), eyre::Report> {
    let message = world
        .pending
        .take()
        .ok_or_else(|| eyre::eyre!("no pending message in scenario world"))?
        .build(&DefaultClock);
    let adapter = world.adapter()?;
    world.last_result = Some(adapter.deliver(&message));
    world.delivered = Some(message);
    Ok(())
}
