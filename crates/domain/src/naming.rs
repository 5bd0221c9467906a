use crate::annotation_file_name;

/// Like `unique_file_name`, but a candidate also counts as taken when its
/// `<stem>.xml` annotation name is, so an image never shares an annotation
/// file with another image of the same stem.
pub fn unique_photo_name(file_name: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    unique_file_name(file_name, |candidate| {
        is_taken(candidate) || is_taken(&annotation_file_name(candidate))
    })
}

/// Returns `file_name`, or the first `stem_N.ext` (N = 1, 2, ...) for which
/// `is_taken` answers false.
fn unique_file_name(file_name: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    if !is_taken(file_name) {
        return file_name.to_string();
    }

    let (stem, extension) = split_extension(file_name);
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{stem}_{counter}{extension}");
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Splits `a.jpg` into `("a", ".jpg")`; leading dots do not start an extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(index) if file_name[..index].chars().any(|c| c != '.') => {
            file_name.split_at(index)
        }
        _ => (file_name, ""),
    }
}
