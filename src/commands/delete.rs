use anyhow::Result;
use daycal_core::Event;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::store::EventStore;

pub fn run(store: &mut EventStore, id: &str, yes: bool) -> Result<()> {
    delete_with(store, id, |event| {
        if yes {
            return Ok(true);
        }
        println!("{}", event.render());
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;
        Ok(confirmed)
    })
}

/// Delete after `confirm` agrees. A refusal leaves the store untouched.
fn delete_with(
    store: &mut EventStore,
    id: &str,
    confirm: impl FnOnce(&Event) -> Result<bool>,
) -> Result<()> {
    let event = store.resolve(id)?;
    if !confirm(event)? {
        println!("{}", "  Cancelled".dimmed());
        return Ok(());
    }

    let id = event.id;
    let removed = store.delete(id)?;

    println!("{}", format!("  Deleted: {}", removed.title).red());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{at, temp_store};

    #[test]
    fn test_declined_delete_keeps_the_event() {
        let (_dir, mut store) = temp_store();
        let event = Event::new("Dentist", at(2024, 6, 3, 9, 0), at(2024, 6, 3, 10, 0)).unwrap();
        let id = event.id;
        store.create(event).unwrap();

        delete_with(&mut store, &id.to_string(), |_| Ok(false)).unwrap();
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_confirmed_delete_removes_the_event() {
        let (dir, mut store) = temp_store();
        let event = Event::new("Dentist", at(2024, 6, 3, 9, 0), at(2024, 6, 3, 10, 0)).unwrap();
        let id = event.id;
        store.create(event).unwrap();

        let mut asked = None;
        delete_with(&mut store, &id.to_string()[..8], |e| {
            asked = Some(e.title.clone());
            Ok(true)
        })
        .unwrap();

        assert_eq!(asked.as_deref(), Some("Dentist"));
        assert!(store.get(id).is_none());
        let reopened = EventStore::open(dir.path().join("events.json")).unwrap();
        assert!(reopened.events().is_empty());
    }
}
