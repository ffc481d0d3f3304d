#![allow(deprecated)]
//! End-to-end tests for the `tufkeys` binary.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use assert_cmd::Command;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use predicates::prelude::*;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use tempfile::tempdir;

fn private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("failed to generate RSA key")
    })
}

fn write_record(dir: &Path, name: &str, pem: &str) -> std::path::PathBuf {
    let record = serde_json::json!({
        "keytype": "rsa",
        "scheme": "rsassa-pss-sha256",
        "value": { "public": pem },
    });
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec(&record).unwrap()).unwrap();
    path
}

fn spki_pem() -> String {
    RsaPublicKey::from(private_key())
        .to_public_key_pem(LineEnding::LF)
        .unwrap()
}

fn sign(message: &[u8]) -> Vec<u8> {
    private_key()
        .sign(Pkcs1v15Sign::new::<Sha256>(), &Sha256::digest(message))
        .unwrap()
}

fn tufkeys() -> Command {
    let mut cmd = Command::cargo_bin("tufkeys").unwrap();
    cmd.env_remove("TUFKEYS_KEY")
        .env_remove("TUFKEYS_SIGNATURE_ENCODING");
    cmd
}

#[test]
fn verify_raw_signature_succeeds() {
    let dir = tempdir().unwrap();
    let key = write_record(dir.path(), "key.json", &spki_pem());
    let message = dir.path().join("root.json");
    let signature = dir.path().join("root.json.sig");
    fs::write(&message, b"{\"signed\":{}}").unwrap();
    fs::write(&signature, sign(b"{\"signed\":{}}")).unwrap();

    tufkeys()
        .arg("verify")
        .arg("--key")
        .arg(&key)
        .arg(&message)
        .arg(&signature)
        .assert()
        .success()
        .stdout(predicate::str::contains("Verification successful!"));
}

#[test]
fn verify_base64_signature_from_env() {
    let dir = tempdir().unwrap();
    let key = write_record(dir.path(), "key.json", &spki_pem());
    let message = dir.path().join("targets.json");
    let signature = dir.path().join("targets.json.sig");
    fs::write(&message, b"targets").unwrap();
    fs::write(&signature, format!("{}\n", BASE64.encode(sign(b"targets")))).unwrap();

    tufkeys()
        .env("TUFKEYS_KEY", &key)
        .env("TUFKEYS_SIGNATURE_ENCODING", "base64")
        .arg("verify")
        .arg("--quiet")
        .arg(&message)
        .arg(&signature)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn verify_tampered_message_exits_4() {
    let dir = tempdir().unwrap();
    let key = write_record(dir.path(), "key.json", &spki_pem());
    let message = dir.path().join("snapshot.json");
    let signature = dir.path().join("snapshot.json.sig");
    fs::write(&message, b"tampered").unwrap();
    fs::write(&signature, sign(b"original")).unwrap();

    tufkeys()
        .arg("verify")
        .arg("--key")
        .arg(&key)
        .arg(&message)
        .arg(&signature)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("signature verification failed"));
}

#[test]
fn verify_malformed_key_exits_1() {
    let dir = tempdir().unwrap();
    let key = write_record(dir.path(), "key.json", "not a pem");
    let message = dir.path().join("m");
    let signature = dir.path().join("s");
    fs::write(&message, b"m").unwrap();
    fs::write(&signature, b"s").unwrap();

    tufkeys()
        .arg("verify")
        .arg("--key")
        .arg(&key)
        .arg(&message)
        .arg(&signature)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed key"));
}

#[test]
fn verify_missing_message_exits_2() {
    let dir = tempdir().unwrap();
    let key = write_record(dir.path(), "key.json", &spki_pem());

    tufkeys()
        .arg("verify")
        .arg("--key")
        .arg(&key)
        .arg(dir.path().join("missing"))
        .arg(dir.path().join("missing.sig"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read message"));
}

#[test]
fn key_id_matches_across_encodings() {
    let dir = tempdir().unwrap();
    let public = RsaPublicKey::from(private_key());
    let pkcs1 = write_record(
        dir.path(),
        "pkcs1.json",
        &public.to_pkcs1_pem(LineEnding::LF).unwrap(),
    );
    let spki = write_record(dir.path(), "spki.json", &spki_pem());

    let run = |path: &Path| -> serde_json::Value {
        let output = tufkeys()
            .arg("key-id")
            .arg("--json")
            .arg(path)
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    };

    let a = run(&pkcs1);
    let b = run(&spki);
    assert_eq!(a["public"], b["public"]);
    assert_eq!(a["canonical"], serde_json::Value::Bool(true));
    assert_ne!(a["keyid"], b["keyid"]);
    assert_eq!(a["keytype"], "rsa");
}

#[test]
fn schemes_lists_rsa() {
    tufkeys()
        .arg("schemes")
        .assert()
        .success()
        .stdout(predicate::str::contains("rsa"));
}
