use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Book: Identifiable {
    fn isbn(&self) -> &str;
    fn title(&self) -> &str;
    fn short_descr(&self) -> &str;

    // case-insensitive substring test over title and short description, `needle` must
    // already be lower-cased
    fn matches(&self, needle: &str) -> bool {
        self.short_descr().to_lowercase().contains(needle) || self.title().to_lowercase().contains(needle)
    }
}
