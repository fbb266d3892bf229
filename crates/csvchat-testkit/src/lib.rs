// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const EMENTA_HEADERS: [&str; 5] = ["Numero", "Tipo", "Ementa", "Data", "CONTEUDO"];

const DOCUMENT_TYPES: [&str; 5] = ["Lei", "Decreto", "Portaria", "Resolução", "Instrução Normativa"];

const SUBJECTS: [&str; 12] = [
    "tributação de serviços",
    "licitações e contratos",
    "proteção de dados pessoais",
    "saneamento básico",
    "regime de previdência",
    "transporte coletivo",
    "uso do solo urbano",
    "meio ambiente",
    "saúde suplementar",
    "educação infantil",
    "energia renovável",
    "segurança alimentar",
];

const VERBS: [&str; 6] = [
    "Dispõe sobre",
    "Altera a regulamentação de",
    "Institui o programa de",
    "Estabelece normas para",
    "Revoga dispositivos sobre",
    "Regulamenta",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmentaRecord {
    pub numero: String,
    pub tipo: String,
    pub ementa: String,
    pub data: String,
    pub conteudo: String,
}

impl EmentaRecord {
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.numero,
            &self.tipo,
            &self.ementa,
            &self.data,
            &self.conteudo,
        ]
    }
}

/// Deterministic regulatory-document rows shaped like the default data set.
#[derive(Debug, Clone)]
pub struct EmentaFaker {
    rng: DeterministicRng,
}

impl EmentaFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn record(&mut self) -> EmentaRecord {
        let tipo = self.pick(&DOCUMENT_TYPES).to_owned();
        let subject = self.pick(&SUBJECTS);
        let verb = self.pick(&VERBS);
        let numero = format!("{}/{}", 100 + self.rng.int_n(9_900), 2015 + self.rng.int_n(10));
        let data = format!(
            "{:02}/{:02}/{}",
            1 + self.rng.int_n(28),
            1 + self.rng.int_n(12),
            2015 + self.rng.int_n(10)
        );
        let articles = 1 + self.rng.int_n(3);
        let conteudo = (1..=articles)
            .map(|article| format!("Art. {article}º Fica estabelecido, para fins de {subject}, o disposto nesta norma."))
            .collect::<Vec<_>>()
            .join("\n");

        EmentaRecord {
            ementa: format!("{verb} {subject}, e dá outras providências."),
            numero,
            tipo,
            data,
            conteudo,
        }
    }

    pub fn records(&mut self, count: usize) -> Vec<EmentaRecord> {
        (0..count).map(|_| self.record()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

/// Encodes records as CSV with `EMENTA_HEADERS`, inserting a blank row
/// after every `blank_every` records when set.
pub fn ementa_csv(records: &[EmentaRecord], blank_every: Option<usize>) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(EMENTA_HEADERS)
        .context("write header row")?;
    for (index, record) in records.iter().enumerate() {
        writer.write_record(record.cells()).context("write row")?;
        if let Some(every) = blank_every
            && every > 0
            && (index + 1) % every == 0
        {
            writer.write_record(["", "", "", "", ""]).context("write blank row")?;
        }
    }
    let bytes = writer.into_inner().context("flush csv writer")?;
    String::from_utf8(bytes).context("csv output is not UTF-8")
}

pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write fixture {}", path.display()))?;
    Ok(path)
}

pub fn temp_csv(contents: impl AsRef<[u8]>) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = write_file(dir.path(), "data.csv", contents)?;
    Ok((dir, path))
}

/// `Ementa,Data` header plus one row whose accented text is Windows-1252
/// encoded, as spreadsheet exports often are.
pub fn windows_1252_csv() -> Vec<u8> {
    let mut bytes = b"Ementa,Data\n".to_vec();
    // "Resolução" in Windows-1252.
    bytes.extend_from_slice(&[b'R', b'e', b's', b'o', b'l', b'u', 0xE7, 0xE3, b'o']);
    bytes.extend_from_slice(b",01/02/2024\n");
    bytes
}
