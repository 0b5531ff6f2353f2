use anyhow::Result;
use owo_colors::OwoColorize;

use super::EventFields;
use crate::render::Render;
use crate::store::EventStore;

pub fn run(store: &mut EventStore, id: &str, title: Option<String>, fields: EventFields) -> Result<()> {
    let mut event = store.resolve(id)?.clone();

    if let Some(title) = title {
        event.title = title;
    }
    fields.apply_to(&mut event)?;

    let updated = store.update(event)?;

    println!("{}", format!("  Updated: {}", updated.title).yellow());
    println!("  {}", updated.render());

    Ok(())
}
