use predicates::prelude::*;

#[test]
fn completions_command_outputs_bash_script() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("forecast");
    cmd.args(["completions", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("forecast"))
        .stdout(predicate::str::contains("howmany"));
}
