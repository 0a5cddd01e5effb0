pub mod item_table;
pub mod quote_card;
pub mod toast;
