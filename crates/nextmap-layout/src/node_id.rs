//! Node identity for the tree layout.

use rustc_hash::FxHashMap;

const SUFFIX_LEN: usize = 8;

/// Collapse every run of non-alphanumeric characters into a single `-`.
pub fn sanitize(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    let mut in_run = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c);
            in_run = false;
        } else if !in_run {
            id.push('-');
            in_run = true;
        }
    }
    id
}

fn hash_suffix(raw: &str, salt: usize) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(raw.as_bytes());
    if salt > 0 {
        hasher.update(&salt.to_le_bytes());
    }
    let mut hex = hasher.finalize().to_hex().to_string();
    hex.truncate(SUFFIX_LEN);
    hex
}

/// Hands out unique ids. The first raw key to claim a sanitized id keeps it;
/// later keys that sanitize the same way get a hash of their raw key.
#[derive(Debug, Default)]
pub struct IdRegistry {
    claimed: FxHashMap<String, String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `candidate`, which was derived from `raw`.
    pub fn claim(&mut self, candidate: String, raw: &str) -> String {
        match self.claimed.get(&candidate) {
            None => {
                self.claimed.insert(candidate.clone(), raw.to_string());
                return candidate;
            }
            Some(owner) if owner == raw => return candidate,
            Some(_) => {}
        }

        let mut salt = 0;
        loop {
            let id = format!("{candidate}-{}", hash_suffix(raw, salt));
            match self.claimed.get(&id) {
                Some(owner) if owner != raw => salt += 1,
                _ => {
                    tracing::debug!("Node id '{}' taken, using '{}' for {}", candidate, id, raw);
                    self.claimed.insert(id.clone(), raw.to_string());
                    return id;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
