use crate::node::NodeId;
use crc32fast::Hasher;

/// Generate the id seed for a project using CRC32
pub fn get_project_seed(project_id: &str) -> String {
    let mut buff = String::from(project_id);
    if !project_id.starts_with("project://") {
        buff = format!("project://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for component nodes within a project
///
/// The counter only moves forward, so an id handed out once is never
/// produced again for the same seed, even after its node is deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Project seed (CRC32)
    count: u64,   // Sequential counter
}

impl IdGenerator {
    pub fn new(project_id: &str) -> Self {
        Self {
            seed: get_project_seed(project_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId::new(format!("{}-{}", self.seed, self.count))
    }

    /// Get project seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Advance the counter past every id in `ids` that was minted from this
    /// seed. Used when a session resumes from a persisted project.
    pub fn resume_after<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>) {
        let prefix = format!("{}-", self.seed);
        for id in ids {
            let suffix = id
                .as_str()
                .strip_prefix(&prefix)
                .and_then(|rest| rest.parse::<u64>().ok());
            if let Some(n) = suffix {
                self.count = self.count.max(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_seed_generation() {
        let id1 = get_project_seed("landing");
        let id2 = get_project_seed("landing");

        // Same project always generates same seed
        assert_eq!(id1, id2);

        // Different projects generate different seeds
        let id3 = get_project_seed("portfolio");
        assert_ne!(id1, id3);

        // Prefixed and bare ids hash identically
        assert_eq!(id1, get_project_seed("project://landing"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("landing");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert!(id1.as_str().ends_with("-1"));
        assert!(id2.as_str().ends_with("-2"));
        assert!(id3.as_str().ends_with("-3"));

        let seed = gen.seed();
        assert!(id1.as_str().starts_with(seed));
        assert!(id3.as_str().starts_with(seed));
    }

    #[test]
    fn test_resume_after_existing_ids() {
        let mut gen = IdGenerator::from_seed("abc".to_string());
        let existing = vec![
            NodeId::new("abc-4"),
            NodeId::new("abc-12"),
            NodeId::new("foreign-99"),
            NodeId::new("abc-x"),
        ];

        gen.resume_after(&existing);

        assert_eq!(gen.count(), 12);
        assert_eq!(gen.new_id().as_str(), "abc-13");
    }
}
