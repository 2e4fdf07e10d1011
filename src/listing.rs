use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::Result;

#[derive(Debug, Clone)]
pub struct ListingOptions {
    pub dir: PathBuf,
    pub output: PathBuf,
    /// Matched case-insensitively against the end of each entry name.
    pub extension: String,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            dir: "images".into(),
            output: "images.json".into(),
            extension: "png".into(),
        }
    }
}

/// Names of the entries in `dir` ending in `.{extension}`, ignoring case, sorted.
#[instrument(level = "debug")]
pub fn list_images(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let suffix = format!(".{}", extension.to_lowercase());
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = match entry?.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                tracing::warn!(?name, "skipping entry with a non UTF-8 name");
                continue;
            }
        };
        if name.to_lowercase().ends_with(&suffix) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Writes `names` to `path` as a 2-space indented JSON array, replacing the file.
pub fn write_listing(path: &Path, names: &[String]) -> Result<()> {
    let json = serde_json::to_string_pretty(names)?;
    fs::write(path, json)?;
    Ok(())
}

/// Lists the images in `options.dir` and writes them to `options.output`.
#[instrument(skip_all, fields(dir = %options.dir.display()))]
pub fn generate(options: &ListingOptions) -> Result<Vec<String>> {
    let names = list_images(&options.dir, &options.extension)?;
    write_listing(&options.output, &names)?;
    tracing::debug!(count = names.len(), output = %options.output.display(), "wrote listing");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn keeps_matching_names_in_any_case() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "A.PNG", "c.Png", "notes.txt", "png", "photo.jpg"] {
            touch(dir.path(), name);
        }

        let names = list_images(dir.path(), "png").unwrap();
        assert_eq!(names, ["A.PNG", "b.png", "c.Png"]);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_images(dir.path(), "png").unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_images(&dir.path().join("nope"), "png").is_err());
    }

    #[test]
    fn listing_is_indented_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("images.json");
        fs::write(&out, "stale content that is much longer than the new listing").unwrap();

        write_listing(&out, &["a.png".to_string(), "b.png".to_string()]).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, "[\n  \"a.png\",\n  \"b.png\"\n]");
    }

    #[test]
    fn generate_writes_what_it_returns() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        fs::create_dir(&images).unwrap();
        touch(&images, "one.png");
        touch(&images, "two.PNG");
        touch(&images, "skip.gif");
        let options = ListingOptions {
            dir: images,
            output: dir.path().join("images.json"),
            extension: "png".into(),
        };

        let names = generate(&options).unwrap();

        let parsed: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&options.output).unwrap()).unwrap();
        assert_eq!(parsed, names);
        assert_eq!(names.len(), 2);
    }
}
