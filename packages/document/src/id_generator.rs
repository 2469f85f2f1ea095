use crc32fast::Hasher;

/// Generate a document key from a section identifier using CRC32.
pub fn get_document_key(section_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(section_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for nodes within a document.
///
/// Ids are `"{seed}-{n}"`. Two generators with different seeds never
/// collide; within one generator the counter guarantees uniqueness.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(section_id: &str) -> Self {
        Self {
            seed: get_document_key(section_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate the next sequential id.
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Get the generator's seed.
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key_is_stable() {
        let k1 = get_document_key("section-alpha");
        let k2 = get_document_key("section-alpha");
        assert_eq!(k1, k2);

        let k3 = get_document_key("section-beta");
        assert_ne!(k1, k3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::new("section-alpha");

        let a = ids.new_id();
        let b = ids.new_id();
        let c = ids.new_id();

        assert!(a.ends_with("-1"));
        assert!(b.ends_with("-2"));
        assert!(c.ends_with("-3"));
        assert_ne!(a, b);
        assert!(a.starts_with(ids.seed()));
    }
}
