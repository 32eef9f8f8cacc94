use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::shopping::checklist::Checklist;
use crate::shopping::consolidate::ShoppingList;

const HEADER: [&str; 5] = ["category", "item", "amount", "used_for", "checked"];

/// Write the shopping list as CSV, one row per line item.
pub fn write_csv<W: Write>(list: &ShoppingList, checklist: &Checklist, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for group in list.categories() {
        let label = group.label();
        for (item_key, item) in group.items() {
            let checked = if checklist.is_checked(group.key(), item_key) {
                "yes"
            } else {
                "no"
            };
            wtr.write_record([
                label.as_str(),
                item.name.as_str(),
                item.summary().as_str(),
                item.occurrences.join(", ").as_str(),
                checked,
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write the shopping list as CSV to a file.
pub fn save_csv<P: AsRef<Path>>(list: &ShoppingList, checklist: &Checklist, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(list, checklist, file)
}
