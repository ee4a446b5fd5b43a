use tabled::Table;

use crate::{catalog::MoodCatalog, error};

pub fn moods() {
    let catalog = match MoodCatalog::builtin() {
        Ok(c) => c,
        Err(e) => error!("Invalid mood catalog: {}", e),
    };

    println!("{}", Table::new(catalog.table_rows()));
}
