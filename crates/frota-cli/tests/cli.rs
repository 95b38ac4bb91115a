//! End-to-end tests for the frota binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE_NFE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe" versao="4.00">
  <NFe>
    <infNFe>
      <ide>
        <nNF>123</nNF>
        <dhEmi>2024-05-01T10:00:00-03:00</dhEmi>
      </ide>
      <emit>
        <xNome>Acme Fuels</xNome>
      </emit>
      <det nItem="1">
        <prod>
          <xProd>DIESEL S10</xProd>
          <qCom>10.0000</qCom>
          <vUnCom>5.0</vUnCom>
          <vProd>50.0</vProd>
        </prod>
      </det>
      <infAdic>
        <infCpl>Placa: XYZ1A23 KM: 1000</infCpl>
      </infAdic>
    </infNFe>
  </NFe>
</nfeProc>"#;

fn write_sample(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn process_prints_records_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "nfe.xml", SAMPLE_NFE);

    Command::cargo_bin("frota")
        .unwrap()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoiceId\": 123"))
        .stdout(predicate::str::contains("\"plate\": \"XYZ1A23\""))
        .stdout(predicate::str::contains("\"kilometers\": 1000"));
}

#[test]
fn process_rejects_missing_input() {
    Command::cargo_bin("frota")
        .unwrap()
        .arg("process")
        .arg("does-not-exist.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_isolates_malformed_documents() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "a.xml", SAMPLE_NFE);
    write_sample(&dir, "broken.xml", "<infNFe><ide>");

    Command::cargo_bin("frota")
        .unwrap()
        .arg("batch")
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoiceId\": 123"))
        .stdout(predicate::str::contains("broken.xml"));
}

#[test]
fn batch_writes_diagnostics_csv() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "broken.xml", "not xml at all");
    let diagnostics = dir.path().join("diagnostics.csv");

    Command::cargo_bin("frota")
        .unwrap()
        .arg("batch")
        .arg(dir.path().to_str().unwrap())
        .arg("--diagnostics")
        .arg(&diagnostics)
        .assert()
        .success();

    let content = fs::read_to_string(&diagnostics).unwrap();
    assert!(content.contains("broken.xml"));
    assert!(content.contains("malformed document"));
}

#[test]
fn config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frota.json");

    Command::cargo_bin("frota")
        .unwrap()
        .arg("config")
        .arg("init")
        .arg(&path)
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("xml_abastecimentos"));
    assert!(content.contains("timeout_secs"));
}
