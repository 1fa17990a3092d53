use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_page_size() -> u32 {
    100
}

pub fn default_cache_path() -> PathBuf {
    PathBuf::from(".pulse/cache.json")
}

pub fn default_templates() -> PathBuf {
    PathBuf::from("templates.yaml")
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    500
}

pub fn default_true() -> bool {
    true
}
