use assert_cmd::cargo::cargo_bin_cmd;
use gemlist_testing::TestWorld;
use predicates::prelude::*;

#[test]
fn test_defaults_json_for_melee() {
    let world = TestWorld::new();
    let result = world
        .run(&[
            "--format", "json", "defaults", "--family", "diamonds", "--subtype", "melee",
        ])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json().unwrap();
    assert_eq!(json["family"], "diamonds");
    assert_eq!(json["subtype"], "melee");
    assert_eq!(json["caratWeight"], serde_json::json!({"min": 0.001, "max": 0.3}));
    assert_eq!(json["shape"], serde_json::json!([]));
    assert_eq!(json["search"], "");
}

#[test]
fn test_melee_watches_do_not_exist() {
    let world = TestWorld::new();
    let mut cmd = cargo_bin_cmd!("gemlist");
    world
        .configure_command(&mut cmd)
        .args(["defaults", "--family", "watches", "--subtype", "melee"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: No melee catalog for watches"));
}

#[test]
fn test_config_init_and_show() {
    let world = TestWorld::new();

    let mut cmd = cargo_bin_cmd!("gemlist");
    world.configure_command(&mut cmd).args(["config", "init"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    assert!(world.data_dir().join("config.toml").exists());

    let mut cmd = cargo_bin_cmd!("gemlist");
    world.configure_command(&mut cmd).args(["config", "init"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("use --force to overwrite"));

    let mut cmd = cargo_bin_cmd!("gemlist");
    world
        .configure_command(&mut cmd)
        .args(["config", "init", "--force"]);
    cmd.assert().success();

    let result = world.run(&["--format", "json", "config", "show"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json().unwrap();
    assert_eq!(json["api"]["base_url"], "http://localhost:8080/api");
    assert_eq!(json["listing"]["default_page_size"], 20);
}

#[test]
fn test_config_show_plain_is_toml() {
    let world = TestWorld::new();
    world
        .write_config("[api]\nbase_url = \"https://api.example.com\"\n")
        .unwrap();

    let mut cmd = cargo_bin_cmd!("gemlist");
    world.configure_command(&mut cmd).args(["config", "show"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("base_url = \"https://api.example.com\""))
        .stdout(predicate::str::contains("timeout_secs = 30"));
}

#[test]
fn test_browse_reports_unreachable_api() {
    let world = TestWorld::new();
    world
        .write_config("[api]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n")
        .unwrap();

    let mut cmd = cargo_bin_cmd!("gemlist");
    world
        .configure_command(&mut cmd)
        .args(["browse", "--family", "watches"]);
    cmd.assert().failure().stderr(predicate::str::contains("Error:"));
}
