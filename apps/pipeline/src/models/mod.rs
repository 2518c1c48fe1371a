pub mod resume;

pub use resume::*;

use uuid::Uuid;

/// Fresh item identifier. Assigned once at item creation, never regenerated
/// on update.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_id_is_nonempty_and_unique() {
        let a = new_item_id();
        let b = new_item_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }
}
