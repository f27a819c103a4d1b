mod patch_queue;

pub use patch_queue::{PatchQueue, PendingPatch, QueueKey};
