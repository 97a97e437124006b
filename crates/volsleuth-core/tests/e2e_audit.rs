/// End-to-end audit tests.
///
/// Build a fake volumes directory with several tenants and run the full
/// enumeration → walk → summary pipeline over it, sequentially and on a
/// worker pool.
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use volsleuth_core::audit::{audit_tenant, list_tenants};
use volsleuth_core::{audit_volumes, AuditError, ScanConfig, TenantOutcome, Walker};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// ```text
/// volumes/
///   alpha/          flagged: server.js contains "nezha"
///     server.js
///     README.md
///     node_modules/pkg/index.js
///   beta/           clean
///     app.py
///   gamma/          clean: the only suspicious file is excluded
///     node_modules/x.js
///   notes.txt       not a tenant
/// ```
fn build_volumes(root: &Path) {
    write_file(&root.join("alpha/server.js"), "require('nezha')");
    write_file(&root.join("alpha/README.md"), "docs");
    write_file(&root.join("alpha/node_modules/pkg/index.js"), "nezha");
    write_file(&root.join("beta/app.py"), "print('hello')");
    write_file(&root.join("gamma/node_modules/x.js"), "nezha");
    write_file(&root.join("notes.txt"), "not a tenant");
}

fn config_for(volumes: &Path) -> ScanConfig {
    ScanConfig {
        volumes_dir: volumes.to_path_buf(),
        ..ScanConfig::default()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn list_tenants_returns_sorted_directories_only() {
    let tmp = TempDir::new().unwrap();
    build_volumes(tmp.path());

    let tenants = list_tenants(tmp.path()).unwrap();
    let names: Vec<_> = tenants
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn unreadable_volumes_dir_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = config_for(&tmp.path().join("missing"));

    let err = audit_volumes(&config).unwrap_err();
    assert!(
        matches!(err, AuditError::VolumesUnreadable { .. }),
        "got {err:?}"
    );
}

#[test]
fn audit_classifies_each_tenant() {
    let tmp = TempDir::new().unwrap();
    build_volumes(tmp.path());

    let summary = audit_volumes(&config_for(tmp.path())).unwrap();

    assert_eq!(summary.tenants.len(), 3);
    assert!(matches!(
        summary.tenants[0].outcome,
        TenantOutcome::Flagged(_)
    ));
    assert!(matches!(
        summary.tenants[1].outcome,
        TenantOutcome::Clean { .. }
    ));
    assert!(matches!(
        summary.tenants[2].outcome,
        TenantOutcome::Clean { .. }
    ));

    let report = summary.tenants[0].report().unwrap();
    assert_eq!(report.percentages.get(".js"), Some(&50.0));
    assert_eq!(report.percentages.get(".md"), Some(&50.0));
    assert!(report
        .file_flags
        .contains_key(&tmp.path().join("alpha/server.js")));
}

#[test]
fn summary_restates_flags_and_folders() {
    let tmp = TempDir::new().unwrap();
    build_volumes(tmp.path());

    let summary = audit_volumes(&config_for(tmp.path())).unwrap();

    assert!(summary.has_flags());
    let files = summary.flagged_files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, tmp.path().join("alpha/server.js"));
    assert_eq!(files[0].1, ["Nezha was detected".to_string()]);

    // gamma is clean but its excluded folder is still listed.
    let folders = summary.excluded_folders();
    assert_eq!(folders.len(), 2);
    assert!(folders.contains(tmp.path().join("alpha/node_modules").as_path()));
    assert!(folders.contains(tmp.path().join("gamma/node_modules").as_path()));
    assert_eq!(summary.failed().count(), 0);
}

#[test]
fn run_without_flags_reports_none() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("only/app.py"), "print(1)");

    let summary = audit_volumes(&config_for(tmp.path())).unwrap();

    assert!(!summary.has_flags());
    assert_eq!(summary.clean_count(), 1);
}

/// The worker-pool run must agree with the sequential run tenant by tenant.
#[test]
fn parallel_run_matches_sequential() {
    let tmp = TempDir::new().unwrap();
    build_volumes(tmp.path());
    for i in 0..8 {
        write_file(
            &tmp.path().join(format!("extra{i}/sub/mod.py")),
            if i % 2 == 0 { "nezha" } else { "clean" },
        );
    }

    let sequential = audit_volumes(&config_for(tmp.path())).unwrap();
    let parallel = audit_volumes(&ScanConfig {
        parallel: true,
        threads: Some(4),
        ..config_for(tmp.path())
    })
    .unwrap();

    assert_eq!(sequential.tenants, parallel.tenants);
    assert_eq!(parallel.flagged().count(), 5);
}

/// A tenant whose walk aborts is reported as failed, not clean.
#[test]
fn failed_walk_is_distinguishable_from_clean() {
    let tmp = TempDir::new().unwrap();
    let config = ScanConfig::default();
    let walker = Walker::new(&config);

    let result = audit_tenant(&walker, &tmp.path().join("vanished"));

    assert!(matches!(result.outcome, TenantOutcome::Failed { .. }));
    assert!(result.report().is_none());
}

#[test]
fn clean_tenant_keeps_its_excluded_folders() {
    let tmp = TempDir::new().unwrap();
    build_volumes(tmp.path());
    let config = config_for(tmp.path());
    let walker = Walker::new(&config);

    let result = audit_tenant(&walker, &tmp.path().join("gamma"));

    match &result.outcome {
        TenantOutcome::Clean { folder_flags } => {
            assert_eq!(folder_flags.len(), 1);
            assert!(folder_flags.contains(&tmp.path().join("gamma/node_modules")));
        }
        other => panic!("expected Clean, got {other:?}"),
    }
}

/// Permission denied partway through a tenant fails the whole tenant.
#[cfg(unix)]
#[test]
fn unreadable_subdirectory_fails_tenant() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    build_volumes(tmp.path());
    let locked = tmp.path().join("alpha/locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores directory permissions, so there is nothing to observe.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let config = config_for(tmp.path());
    let walker = Walker::new(&config);
    let result = audit_tenant(&walker, &tmp.path().join("alpha"));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(
        matches!(result.outcome, TenantOutcome::Failed { .. }),
        "got {:?}",
        result.outcome
    );
    assert!(result.report().is_none());
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_tenants() {
    let tmp = TempDir::new().unwrap();
    build_volumes(tmp.path());
    std::os::unix::fs::symlink(tmp.path().join("alpha"), tmp.path().join("alias")).unwrap();

    let tenants = list_tenants(tmp.path()).unwrap();
    assert_eq!(tenants.len(), 3);
}
