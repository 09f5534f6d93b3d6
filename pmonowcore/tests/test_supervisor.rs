//! Tests du superviseur du processus compagnon.

use pmonowcore::{CompanionSupervisor, NowPlayingError};

#[tokio::test]
async fn unmanaged_supervisor_reports_alive() {
    let supervisor = CompanionSupervisor::new(None);
    assert!(!supervisor.is_managed());
    assert!(supervisor.is_alive().await);

    // launch/stop sans exécutable : comportement défini, pas de panique.
    assert!(matches!(
        supervisor.launch().await,
        Err(NowPlayingError::CompanionNotConfigured)
    ));
    supervisor.stop().await;
}

#[tokio::test]
async fn missing_executable_is_reported() {
    let supervisor = CompanionSupervisor::new(Some("/nonexistent/companion".into()));
    assert!(supervisor.is_managed());
    assert!(!supervisor.is_alive().await);

    match supervisor.launch().await {
        Err(NowPlayingError::CompanionNotFound(path)) => {
            assert_eq!(path, std::path::PathBuf::from("/nonexistent/companion"));
        }
        other => panic!("Unexpected launch result: {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn launch_is_idempotent_and_stop_terminates() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("companion.sh");
    std::fs::write(&script, "#!/bin/sh\necho companion ready\nsleep 30\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let supervisor = CompanionSupervisor::new(Some(script));

    supervisor.launch().await.unwrap();
    assert!(supervisor.is_alive().await);

    // Second launch : no-op, le processus reste le même.
    supervisor.launch().await.unwrap();
    assert!(supervisor.is_alive().await);

    supervisor.stop().await;
    assert!(!supervisor.is_alive().await);

    // Stop répété : sans effet.
    supervisor.stop().await;
}

#[cfg(unix)]
#[tokio::test]
async fn dead_companion_is_detected_and_relaunchable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("companion.sh");
    std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let supervisor = CompanionSupervisor::new(Some(script));
    supervisor.launch().await.unwrap();

    // Le script sort immédiatement ; la sonde doit finir par le voir.
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    assert!(!supervisor.is_alive().await);

    // Une relance est alors possible.
    supervisor.launch().await.unwrap();
}
