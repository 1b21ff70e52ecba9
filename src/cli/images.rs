//! `images` and `search` handlers

use serde_json::Value;

use crate::cli::cell;
use crate::shell::adapter::{
    allowed_args, display_name, filesize, format_unix_time_ago, short_id, split_repo_tag, ImageFilter,
};
use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome};

const UNTAGGED: &str = "<none>:<none>";

/// List images, one row per repository tag
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let quiet = call.options.flag("quiet");
    let filter = call.options.text("name").map(ImageFilter::parse);
    let images = ctx.engine.images(&allowed_args(CommandKind::Images, call.options))?;

    let mut ids: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for image in &images {
        let id = image["Id"].as_str().unwrap_or_default();
        for repo_tag in repo_tags(image) {
            let (repository, tag) = split_repo_tag(&repo_tag);
            let tag = tag.unwrap_or_else(|| "<none>".to_string());
            if filter.as_ref().is_some_and(|filter| !filter.matches(&repository, &tag)) {
                continue;
            }

            if quiet {
                let short = short_id(id).to_string();
                if !ids.contains(&short) {
                    ids.push(short);
                }
                continue;
            }

            let size = image["VirtualSize"].as_i64().or_else(|| image["Size"].as_i64());
            rows.push(vec![
                display_name(&repository, id),
                display_name(&tag, id),
                short_id(id).to_string(),
                image["Created"]
                    .as_i64()
                    .map(format_unix_time_ago)
                    .unwrap_or_default(),
                filesize(size.unwrap_or_default()),
            ]);
        }
    }

    if ids.is_empty() && rows.is_empty() {
        return Ok(Outcome::message("There are no images to list."));
    }
    if quiet {
        return Ok(Outcome::lines(ids));
    }
    Ok(Outcome::table(&["REPOSITORY", "TAG", "IMAGE ID", "CREATED", "SIZE"], rows))
}

fn repo_tags(image: &Value) -> Vec<String> {
    match image["RepoTags"].as_array() {
        Some(tags) if !tags.is_empty() => tags.iter().filter_map(Value::as_str).map(String::from).collect(),
        _ => vec![UNTAGGED.to_string()],
    }
}

/// Search the registry for images matching a term
pub fn search(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(term) = call.args.first() else {
        return Ok(Outcome::message("Search term is required."));
    };

    let results = ctx.engine.search(term)?;
    if results.is_empty() {
        return Ok(Outcome::message("No images were found."));
    }

    let ok = |value: &Value| match value.as_bool() {
        Some(true) => "[OK]".to_string(),
        _ => String::new(),
    };
    let rows = results
        .iter()
        .map(|result| {
            vec![
                cell(&result["name"]),
                cell(&result["description"]),
                cell(&result["star_count"]),
                ok(&result["is_official"]),
                ok(&result["is_automated"]),
            ]
        })
        .collect();
    Ok(Outcome::table(&["NAME", "DESCRIPTION", "STARS", "OFFICIAL", "AUTOMATED"], rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::{context, invocation, lines, table};
    use crate::engine::fake::FakeEngine;

    fn engine() -> FakeEngine {
        FakeEngine::new()
            .with_image("sha256:0123456789abcdef0123", Some(&["ubuntu:latest", "ubuntu:22.04"]), 1024 * 1024)
            .with_image("sha256:fedcba9876543210fedc", None, 2048)
    }

    #[test]
    fn test_images_table() {
        let (ctx, _, _) = context(engine());
        let (headers, rows) = table(execute(&ctx, Invocation::default()).unwrap());

        assert_eq!(headers, vec!["REPOSITORY", "TAG", "IMAGE ID", "CREATED", "SIZE"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][..3], ["ubuntu", "latest", "0123456789ab"]);
        assert_eq!(rows[0][4], "1.0 MB");
        assert!(rows[0][3].ends_with("ago"));
        assert_eq!(rows[1][1], "22.04");
        assert_eq!(rows[2][..3], ["fedcba987654", "fedcba987654", "fedcba987654"]);
    }

    #[test]
    fn test_images_quiet_lists_unique_ids() {
        let (ctx, _, _) = context(engine());
        let outcome = execute(&ctx, invocation(CommandKind::Images, "-q")).unwrap();
        assert_eq!(lines(outcome), vec!["0123456789ab", "fedcba987654"]);
    }

    #[test]
    fn test_images_filter_by_name() {
        let (ctx, _, _) = context(engine());
        let (_, rows) = table(execute(&ctx, invocation(CommandKind::Images, "-f ubuntu:22.04")).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], "22.04");
    }

    #[test]
    fn test_no_images() {
        let (ctx, _, _) = context(FakeEngine::new());
        let outcome = execute(&ctx, Invocation::default()).unwrap();
        assert_eq!(lines(outcome), vec!["There are no images to list."]);
    }

    #[test]
    fn test_search_marks_official_images() {
        let (ctx, _, _) = context(FakeEngine::new());
        let (headers, rows) = table(search(&ctx, invocation(CommandKind::Search, "redis")).unwrap());

        assert_eq!(headers, vec!["NAME", "DESCRIPTION", "STARS", "OFFICIAL", "AUTOMATED"]);
        assert_eq!(rows, vec![vec!["redis", "Official image", "10", "[OK]", ""]]);
    }

    #[test]
    fn test_search_messages() {
        let (ctx, _, _) = context(FakeEngine::new());
        assert_eq!(
            lines(search(&ctx, Invocation::default()).unwrap()),
            vec!["Search term is required."]
        );
        assert_eq!(
            lines(search(&ctx, invocation(CommandKind::Search, "nothing")).unwrap()),
            vec!["No images were found."]
        );
    }
}
