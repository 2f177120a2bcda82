use std::path::Path;

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", name, e));
}

pub fn read_file(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name))
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", name, e))
}

pub fn delete_file(dir: &Path, name: &str) {
    std::fs::remove_file(dir.join(name))
        .unwrap_or_else(|e| panic!("Failed to delete file {:?}: {}", name, e));
}
