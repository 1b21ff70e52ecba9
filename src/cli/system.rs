//! Shell housekeeping and engine-wide information: `clear`, `help`,
//! `refresh`, `info` and `version`

use crate::cli::sorted_pairs;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Output, Refresh};
use crate::shell::help::help_rows;

pub fn clear(_ctx: &Context, _call: Invocation) -> crate::Result<Outcome> {
    Ok(Outcome::new(Output::Clear))
}

pub fn help(_ctx: &Context, _call: Invocation) -> crate::Result<Outcome> {
    Ok(Outcome::pairs(help_rows()))
}

/// Mark every completion list stale
pub fn refresh(_ctx: &Context, _call: Invocation) -> crate::Result<Outcome> {
    Ok(Outcome::nothing().refreshing(Refresh::ALL))
}

pub fn info(ctx: &Context, _call: Invocation) -> crate::Result<Outcome> {
    let info = ctx.engine.info()?;
    Ok(Outcome::pairs(sorted_pairs(&info)))
}

pub fn version(ctx: &Context, _call: Invocation) -> crate::Result<Outcome> {
    let version = ctx.engine.version()?;
    Ok(Outcome::pairs(sorted_pairs(&version)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::context;
    use crate::engine::fake::FakeEngine;

    fn pairs(outcome: Outcome) -> Vec<(String, String)> {
        match outcome.output {
            Output::Pairs(pairs) => pairs,
            other => panic!("expected pairs, got {other:?}"),
        }
    }

    #[test]
    fn test_version_pairs_are_sorted() {
        let (ctx, _, _) = context(FakeEngine::new());
        let rows = pairs(version(&ctx, Invocation::default()).unwrap());

        let keys: Vec<&str> = rows.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["ApiVersion", "Os", "Version"]);
        assert_eq!(rows[2].1, "24.0.7");
    }

    #[test]
    fn test_info_counts() {
        let (ctx, _, _) = context(FakeEngine::new().with_volume("data").with_container("a", "web", "running"));
        let rows = pairs(info(&ctx, Invocation::default()).unwrap());
        assert_eq!(
            rows,
            vec![("Containers".to_string(), "1".to_string()), ("Images".to_string(), "0".to_string())]
        );
    }

    #[test]
    fn test_help_lists_every_command() {
        let (ctx, _, _) = context(FakeEngine::new());
        let rows = pairs(help(&ctx, Invocation::default()).unwrap());
        assert!(rows.iter().any(|(name, _)| name == "volume ls"));
        assert!(rows.iter().any(|(name, _)| name == "shell"));
    }

    #[test]
    fn test_clear_and_refresh() {
        let (ctx, engine, _) = context(FakeEngine::new());
        assert!(matches!(clear(&ctx, Invocation::default()).unwrap().output, Output::Clear));
        assert_eq!(refresh(&ctx, Invocation::default()).unwrap().refresh, Refresh::ALL);
        assert!(engine.calls().is_empty());
    }
}
