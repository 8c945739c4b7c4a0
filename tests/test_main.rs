//! Runs the `feather` binary and checks how the process ends.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use tempfile::TempDir;

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn feather(dir: &TempDir, port: u16) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_feather"));
    cmd.args(["-q", "-p", &port.to_string()])
        .current_dir(dir.path())
        .env("LISTEN", "127.0.0.1")
        .env_remove("FEATHER_CONFIG")
        .env_remove("FEATHER_PORT")
        .env_remove("RUST_LOG")
        .stdout(Stdio::null());
    cmd
}

fn wait_until_listening(child: &mut Child, addr: SocketAddr) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while TcpStream::connect(addr).is_err() {
        if let Some(status) = child.try_wait().unwrap() {
            panic!("server exited early with {status}");
        }
        assert!(Instant::now() < deadline, "server never started listening");
        sleep(Duration::from_millis(20));
    }
}

fn wait_with_timeout(child: &mut Child, limit: Duration) -> ExitStatus {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            panic!("server did not exit within {limit:?}");
        }
        sleep(Duration::from_millis(20));
    }
}

#[test]
fn test_interrupt_exits_zero_and_closes_listener() {
    let dir = tempfile::tempdir().unwrap();
    let port = free_port();
    let addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();

    let mut child = feather(&dir, port).stderr(Stdio::piped()).spawn().unwrap();
    wait_until_listening(&mut child, addr);

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let status = wait_with_timeout(&mut child, Duration::from_secs(5));
    assert_eq!(status.code(), Some(0));

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Interrupt received"));
    assert!(stderr.contains("Last socket error"));

    assert!(TcpStream::connect(addr).is_err());
}

#[test]
fn test_occupied_port_exits_one_with_red_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let output = feather(&dir, port).output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("\x1B[31m"));
    assert!(stderr.contains("failed to listen on"));
    assert_eq!(stderr.matches("os error").count(), 1);

    drop(occupied);
}
