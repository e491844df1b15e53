use super::{invalid, validate_scope};
use sanerepo_types::{
    FileContent, PackageFilter, RepoPath, Result, RuleDescriptor, RuleKind, RuleOptions,
};

/// The package must contain `file` with exactly `content`.
pub fn file_contents(
    scope: PackageFilter,
    file: &str,
    content: FileContent,
) -> Result<RuleDescriptor> {
    validate_scope(RuleKind::FileContents, &scope)?;

    let file = RepoPath::new(file);
    if !file.is_clean() {
        return Err(invalid(
            RuleKind::FileContents,
            format!("'{file}' must be a relative path inside the package"),
        ));
    }

    Ok(RuleDescriptor::new(
        scope,
        RuleOptions::FileContents { file, content },
    ))
}
