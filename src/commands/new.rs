use anyhow::Result;
use owo_colors::OwoColorize;

use super::{EventFields, default_event};
use crate::config::DaycalConfig;
use crate::render::Render;
use crate::store::EventStore;

pub fn run(store: &mut EventStore, cfg: &DaycalConfig, title: String, fields: EventFields) -> Result<()> {
    let mut event = default_event(title, cfg.default_category)?;
    fields.apply_to(&mut event)?;

    let created = store.create(event)?;

    println!("{}", format!("  Created: {}", created.title).green());
    println!("  {}", created.render());

    Ok(())
}
