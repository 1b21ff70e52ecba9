//! `volume create`, `volume ls`, `volume inspect` and `volume rm` handlers

use std::rc::Rc;

use serde_json::{Map, Value};

use crate::cli::cell;
use crate::engine::{EngineError, LineStream};
use crate::shell::adapter::{allowed_args, kv_to_json, parse_kv, KvValue};
use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};
use crate::shell::value::ArgValue;

const NAME_REQUIRED: &str = "Volume name is required.";

pub fn create(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.options.is_empty() {
        return Ok(Outcome::message(NAME_REQUIRED));
    }

    let mut options = allowed_args(CommandKind::VolumeCreate, call.options);
    let driver_opts = options.list("driver_opts");
    if driver_opts.is_empty() {
        options.remove("driver_opts");
    } else {
        let opts = kv_to_json(&parse_kv(&driver_opts, false));
        options.insert("driver_opts", ArgValue::Nested(opts));
    }

    let created = ctx.engine.create_volume(&options)?;
    Ok(Outcome::message(cell(&created["Name"])).refreshing(Refresh::VOLUMES))
}

/// List volumes. `--filter KEY=VALUE` values are sent as
/// `{"KEY": ["VALUE"]}`, with true/false normalized to lowercase.
pub fn list(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let pairs = parse_kv(&call.options.list("filters"), true);
    let filters: Option<Value> = (!pairs.is_empty()).then(|| {
        let filters = pairs
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    KvValue::Text(text) => text,
                    KvValue::Flag(flag) => flag.to_string(),
                };
                (key, Value::Array(vec![Value::String(value)]))
            })
            .collect::<Map<_, _>>();
        Value::Object(filters)
    });

    let volumes = ctx.engine.volumes(filters.as_ref())?;
    if volumes.is_empty() {
        return Ok(Outcome::message("There are no volumes to list."));
    }

    if call.options.flag("quiet") {
        return Ok(Outcome::lines(volumes.iter().map(|volume| cell(&volume["Name"])).collect()));
    }

    let rows = volumes
        .iter()
        .map(|volume| vec![cell(&volume["Driver"]), cell(&volume["Name"])])
        .collect();
    Ok(Outcome::table(&["DRIVER", "VOLUME NAME"], rows))
}

pub fn inspect(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message(NAME_REQUIRED));
    }

    let mut documents = Vec::with_capacity(call.args.len());
    for name in &call.args {
        match ctx.engine.inspect_volume(name) {
            Ok(volume) => documents.push(volume),
            Err(EngineError::Api { status: 404, .. }) => {
                return Ok(Outcome::message(format!("Volume not found: {name}")))
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Outcome::documents(documents))
}

/// Remove each named volume, one line per volume
pub fn remove(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message(NAME_REQUIRED));
    }

    let engine = Rc::clone(&ctx.engine);
    let lines = call.args.into_iter().map(move |name| match engine.remove_volume(&name) {
        Ok(()) => name,
        Err(e) => format!("Could not remove volume {name}: {e}."),
    });
    Ok(Outcome::stream(LineStream::new(lines)).refreshing(Refresh::VOLUMES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::{context, invocation, lines, table};
    use crate::engine::fake::FakeEngine;
    use crate::shell::dispatcher::Output;
    use serde_json::json;

    #[test]
    fn test_create_with_driver_options() {
        let (ctx, engine, _) = context(FakeEngine::new());
        let outcome = create(
            &ctx,
            invocation(CommandKind::VolumeCreate, "--name data -d local -o type=tmpfs -o o=size=100m"),
        )
        .unwrap();

        assert_eq!(outcome.refresh, Refresh::VOLUMES);
        assert_eq!(lines(outcome), vec!["data"]);

        let sent = engine.last_kwargs("create_volume").unwrap();
        assert_eq!(sent.text("driver"), Some("local"));
        assert_eq!(
            sent.nested("driver_opts"),
            Some(&json!({"type": "tmpfs", "o": "size=100m"}))
        );
    }

    #[test]
    fn test_create_requires_options() {
        let (ctx, engine, _) = context(FakeEngine::new());
        let outcome = create(&ctx, Invocation::default()).unwrap();

        assert_eq!(lines(outcome), vec![NAME_REQUIRED]);
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_list_table_and_quiet() {
        let (ctx, _, _) = context(FakeEngine::new().with_volume("data").with_volume("cache"));

        let (headers, rows) = table(list(&ctx, Invocation::default()).unwrap());
        assert_eq!(headers, vec!["DRIVER", "VOLUME NAME"]);
        assert_eq!(rows, vec![vec!["local", "data"], vec!["local", "cache"]]);

        let outcome = list(&ctx, invocation(CommandKind::VolumeLs, "-q")).unwrap();
        assert_eq!(lines(outcome), vec!["data", "cache"]);
    }

    #[test]
    fn test_list_filters_are_normalized() {
        let (ctx, engine, _) = context(FakeEngine::new().with_volume("data"));
        list(&ctx, invocation(CommandKind::VolumeLs, "--filter dangling=True")).unwrap();

        assert_eq!(engine.calls(), vec!["volumes", r#"filters {"dangling":["true"]}"#]);
    }

    #[test]
    fn test_list_empty() {
        let (ctx, _, _) = context(FakeEngine::new());
        let outcome = list(&ctx, Invocation::default()).unwrap();
        assert_eq!(lines(outcome), vec!["There are no volumes to list."]);
    }

    #[test]
    fn test_inspect() {
        let (ctx, _, _) = context(FakeEngine::new().with_volume("data"));

        let outcome = inspect(&ctx, invocation(CommandKind::VolumeInspect, "data")).unwrap();
        let Output::Documents(documents) = outcome.output else {
            panic!("expected documents");
        };
        assert_eq!(documents[0]["Mountpoint"], "/var/lib/docker/volumes/data/_data");

        let outcome = inspect(&ctx, invocation(CommandKind::VolumeInspect, "ghost")).unwrap();
        assert_eq!(lines(outcome), vec!["Volume not found: ghost"]);
    }

    #[test]
    fn test_inspect_passes_transport_errors_up() {
        let (ctx, _, _) = context(FakeEngine::new().with_volume("data").unreachable_on("data"));

        let err = inspect(&ctx, invocation(CommandKind::VolumeInspect, "data")).unwrap_err();
        assert!(matches!(err, crate::SkiffError::Engine(EngineError::Io(_))));
        assert_eq!(err.to_string(), "IO error: connection refused");
    }

    #[test]
    fn test_remove_reports_failures() {
        let (ctx, _, _) = context(FakeEngine::new().failing_on("busy"));
        let outcome = remove(&ctx, invocation(CommandKind::VolumeRm, "data busy")).unwrap();

        assert_eq!(outcome.refresh, Refresh::VOLUMES);
        assert_eq!(
            lines(outcome),
            vec!["data", "Could not remove volume busy: No such object: busy."]
        );
    }
}
