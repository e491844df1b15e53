//! Resolve generated file content so the rule list carries plain text only.

use sanerepo_types::{FileContent, Result, RuleDescriptor, RuleList, RuleOptions, WorkspaceContext};

/// Replace every `Generated` content with the text it produces in `ctx`.
///
/// Rules are resolved in order; the first generator failure aborts.
pub async fn materialize(rules: &RuleList, ctx: &dyn WorkspaceContext) -> Result<RuleList> {
    let mut out = RuleList::new();
    for rule in rules {
        out.push(materialize_rule(rule, ctx).await?);
    }
    Ok(out)
}

/// Blocking wrapper around [`materialize`].
pub fn materialize_blocking(rules: &RuleList, ctx: &dyn WorkspaceContext) -> Result<RuleList> {
    futures::executor::block_on(materialize(rules, ctx))
}

async fn materialize_rule(
    rule: &RuleDescriptor,
    ctx: &dyn WorkspaceContext,
) -> Result<RuleDescriptor> {
    match &rule.options {
        RuleOptions::FileContents { file, content } if content.is_generated() => {
            let text = content.resolve(ctx).await?;
            tracing::debug!(file = %file, bytes = text.len(), "materialized generated content");
            Ok(RuleDescriptor::new(
                rule.scope.clone(),
                RuleOptions::FileContents {
                    file: file.clone(),
                    content: FileContent::Static(text),
                },
            ))
        }
        _ => Ok(rule.clone()),
    }
}
