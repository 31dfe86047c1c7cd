use redb::TableDefinition;

/// FAQ records: uuid -> Faq (msgpack)
pub const FAQS: TableDefinition<&str, &[u8]> = TableDefinition::new("faqs");
