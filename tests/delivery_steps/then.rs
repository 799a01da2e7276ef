//! Then steps for mail delivery BDD scenarios.

use super::world::DeliveryWorld;
use postbox::delivery::{domain::RecordFields, services::DeliveryError};
use rstest_bdd_macros::then;

fn persisted(world: &DeliveryWorld) -> Result<Vec<RecordFields>, eyre::Report> {
    Ok(world
        .records
        .records()?
        .into_iter()
        .map(|record| record.fields().clone())
        .collect())
}

#[then("delivery succeeds")]
fn delivery_succeeds(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    match &world.last_result {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected delivery to succeed, got {err}")),
        None => Err(eyre::eyre!("no delivery attempted in scenario world")),
    }
}

#[then(r#"delivery fails because the "{field}" address is missing"#)]
fn delivery_fails_missing(world: &DeliveryWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no delivery attempted in scenario world"))?;
    match result {
        Err(DeliveryError::MissingField(missing)) if missing.as_str() == field => Ok(()),
        other => Err(eyre::eyre!("expected missing '{field}' error, got {other:?}")),
    }
}

#[then("{count:usize} records are persisted")]
fn records_persisted(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    let records = persisted(world)?;
    if records.len() != count {
        return Err(eyre::eyre!(
            "expected {count} records, found {}",
            records.len()
        ));
    }
    Ok(())
}

#[then(r#"a record from "{from}" to "{to}" is persisted"#)]
fn record_persisted(world: &DeliveryWorld, from: String, to: String) -> Result<(), eyre::Report> {
    let records = persisted(world)?;
    if !records
        .iter()
        .any(|fields| fields.from == from && fields.to == to)
    {
        return Err(eyre::eyre!("expected a record from '{from}' to '{to}'"));
    }
    Ok(())
}

#[then(r#"every record has bcc "{bcc}""#)]
fn every_record_has_bcc(world: &DeliveryWorld, bcc: String) -> Result<(), eyre::Report> {
    let records = persisted(world)?;
    if let Some(fields) = records
        .iter()
        .find(|fields| fields.bcc.as_deref() != Some(bcc.as_str()))
    {
        return Err(eyre::eyre!("unexpected record {fields:?}"));
    }
    Ok(())
}

#[then("every record has an empty recipient")]
fn every_record_has_empty_recipient(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let records = persisted(world)?;
    if let Some(fields) = records.iter().find(|fields| !fields.to.is_empty()) {
        return Err(eyre::eyre!("expected an empty recipient, found '{}'", fields.to));
    }
    Ok(())
}

#[then("no message is chained")]
fn nothing_chained(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let chained = world.mailbox.deliveries()?;
    if !chained.is_empty() {
        return Err(eyre::eyre!("expected no chained messages, found {}", chained.len()));
    }
    Ok(())
}

#[then("the delivered message is chained once")]
fn chained_once(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let chained = world.mailbox.deliveries()?;
    let delivered = world
        .delivered
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no delivered message in scenario world"))?;
    if chained.as_slice() != std::slice::from_ref(delivered) {
        return Err(eyre::eyre!("expected exactly the delivered message to be chained"));
    }
    Ok(())
}
