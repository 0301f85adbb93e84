use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::BingoError;
use crate::extract::extract_words;
use crate::fetch::{build_client, download_sermon};
use crate::frequency::FrequencyTable;
use crate::models::{BingoCard, CARD_WORDS, ROW_WIDTH};
use crate::normalize::dedupe_words_with_same_stems;
use crate::render::{render_card_text, write_card_json, write_card_pdf};
use crate::select::{arrange_into_rows, replace_common_words_with_blanks, shuffle_words, top_words};
use crate::stopwords::StopwordSet;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub empty_boxes: usize,
    pub frequencies_path: PathBuf,
    pub output_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub timeout: Duration,
    pub print: bool,
}

/// Extract, normalize and select: raw HTML in, finished card out.
///
/// `frequencies` is only consulted when `limit > 0`.
pub fn build_card<R: Rng + ?Sized>(
    html: &str,
    stopwords: &StopwordSet,
    frequencies: Option<&FrequencyTable>,
    limit: usize,
    rng: &mut R,
) -> crate::error::Result<BingoCard> {
    let tokens = extract_words(html);
    let reps = dedupe_words_with_same_stems(&tokens, stopwords);
    if reps.is_empty() {
        return Err(BingoError::EmptyDocument);
    }

    let words = top_words(&reps, CARD_WORDS);
    if words.len() < CARD_WORDS {
        warn!(
            "Short card - only {} distinct words available (want {})",
            words.len(),
            CARD_WORDS
        );
    }
    let words = shuffle_words(words, rng);
    let words = match frequencies {
        Some(table) => replace_common_words_with_blanks(words, table, limit),
        None => words,
    };

    let card = BingoCard {
        rows: arrange_into_rows(&words, ROW_WIDTH),
    };
    debug!(
        "Card built - tokens={}, representatives={}, cells={}, blanks={}",
        tokens.len(),
        reps.len(),
        card.cells().count(),
        card.blank_count()
    );
    Ok(card)
}

pub fn run(cfg: &RunConfig) -> Result<()> {
    let client = build_client(cfg.timeout)?;
    run_with_client(cfg, &client)
}

/// Full run against a caller-supplied HTTP client; `cfg.timeout` is not
/// consulted here. Nothing is written unless every earlier step succeeds.
pub fn run_with_client(cfg: &RunConfig, client: &Client) -> Result<()> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - url={}, empty_boxes={}, output={}",
        cfg.url,
        cfg.empty_boxes,
        cfg.output_path.display()
    );

    let stopwords = StopwordSet::english();
    debug!("Stopwords ready - words={}", stopwords.len());

    // 1) fetch
    let html = download_sermon(client, &cfg.url)?;

    // 2) side-file, only needed when blanking
    let frequencies = if cfg.empty_boxes > 0 {
        Some(FrequencyTable::load(&cfg.frequencies_path)?)
    } else {
        debug!("Blanking disabled - skipping frequency table");
        None
    };

    // 3) analyse
    let analysis_start = std::time::Instant::now();
    let mut rng = match cfg.seed {
        Some(seed) => {
            debug!("Using fixed shuffle seed={}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let card = build_card(
        &html,
        &stopwords,
        frequencies.as_ref(),
        cfg.empty_boxes,
        &mut rng,
    )
    .with_context(|| format!("Building card from {}", cfg.url))?;
    info!(
        "Analysis completed - duration={:.2}s, rows={}, blanks={}",
        analysis_start.elapsed().as_secs_f32(),
        card.rows.len(),
        card.blank_count()
    );

    let grid = render_card_text(&card);
    debug!("Card layout:\n{}", grid);
    if cfg.print {
        print!("{}", grid);
    }

    // 4) persist
    write_card_pdf(&card, &cfg.output_path)
        .with_context(|| format!("Writing {}", cfg.output_path.display()))?;
    debug!("Wrote {}", cfg.output_path.display());

    if let Some(json_path) = &cfg.json_path {
        write_card_json(&card, json_path)
            .with_context(|| format!("Writing {}", json_path.display()))?;
        debug!("Wrote {}", json_path.display());
    }

    info!(
        "Pipeline completed successfully - total_duration={:.2}s, output={}",
        pipeline_start.elapsed().as_secs_f32(),
        cfg.output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::{local_client, serve_once};
    use std::collections::BTreeSet;
    use std::io::Cursor;
    use std::path::Path;

    const HAMLET: &str = include_str!("../tests/fixtures/hamlet_soliloquy.html");
    const SAMPLE_COUNTS: &str = include_str!("../tests/fixtures/count_1w_sample.txt");

    fn sample_table() -> FrequencyTable {
        FrequencyTable::from_reader(Cursor::new(SAMPLE_COUNTS), Path::new("count_1w_sample.txt"))
            .unwrap()
    }

    #[test]
    fn soliloquy_yields_known_vocabulary() {
        let table = sample_table();
        let card = build_card(
            HAMLET,
            &StopwordSet::english(),
            Some(&table),
            3,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();

        let vocabulary: BTreeSet<&str> = card.cells().collect();
        let expected: BTreeSet<&str> = [
            "fortune", "say", "sleep", "", "arrows", "opposing", "suffer", "end", "nobler",
            "bear", "slings", "arms", "sea", "troubles", "outrageous", "Thus", "death", "dieto",
            "mind", "tis", "makes", "question", "Whether",
        ]
        .into_iter()
        .collect();
        assert_eq!(vocabulary, expected);

        assert_eq!(card.rows.len(), 5);
        assert!(card.rows.iter().all(|r| r.len() == ROW_WIDTH));
        assert_eq!(card.blank_count(), 3);
    }

    #[test]
    fn same_seed_same_card() {
        let table = sample_table();
        let sw = StopwordSet::english();
        let a = build_card(HAMLET, &sw, Some(&table), 3, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = build_card(HAMLET, &sw, Some(&table), 3, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_limit_keeps_every_word() {
        let card = build_card(
            HAMLET,
            &StopwordSet::english(),
            None,
            0,
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();
        assert_eq!(card.blank_count(), 0);
        assert_eq!(card.cells().count(), CARD_WORDS);
        assert!(card.cells().any(|w| w == "would"));
    }

    #[test]
    fn small_document_gives_short_last_row() {
        let html = "<p>grace grace mercy peace hope faith love joy</p>";
        let card = build_card(
            html,
            &StopwordSet::english(),
            None,
            0,
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();
        let lens: Vec<usize> = card.rows.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![5, 2]);
    }

    #[test]
    fn document_without_words_is_rejected() {
        let err = build_card(
            "<div>no paragraphs</div><p>the and of ...</p>",
            &StopwordSet::english(),
            None,
            3,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(matches!(err, BingoError::EmptyDocument));
    }

    #[test]
    fn failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RunConfig {
            // nothing listens here; the fetch fails first and nothing is written
            url: "http://127.0.0.1:9/".to_string(),
            empty_boxes: 3,
            frequencies_path: dir.path().join("missing.txt"),
            output_path: dir.path().join("card.pdf"),
            json_path: None,
            seed: Some(1),
            timeout: Duration::from_secs(2),
            print: false,
        };
        assert!(run(&cfg).is_err());
        assert!(!cfg.output_path.exists());
    }

    fn config(url: String, dir: &Path, empty_boxes: usize) -> RunConfig {
        RunConfig {
            url,
            empty_boxes,
            frequencies_path: dir.join("count_1w.txt"),
            output_path: dir.join("out/card.pdf"),
            json_path: Some(dir.join("out/card.json")),
            seed: Some(5),
            timeout: Duration::from_secs(5),
            print: false,
        }
    }

    #[test]
    fn successful_run_writes_pdf_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let (url, server) = serve_once("HTTP/1.1 200 OK", "<p>grace mercy peace grace</p>");
        let cfg = config(url, dir.path(), 0);

        run_with_client(&cfg, &local_client(cfg.timeout)).unwrap();
        server.join().unwrap();

        assert!(std::fs::read(&cfg.output_path).unwrap().starts_with(b"%PDF"));
        let json = std::fs::read(cfg.json_path.as_ref().unwrap()).unwrap();
        let card: BingoCard = serde_json::from_slice(&json).unwrap();
        let words: BTreeSet<&str> = card.cells().collect();
        assert_eq!(words, BTreeSet::from(["grace", "mercy", "peace"]));
    }

    #[test]
    fn successful_run_blanks_using_the_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("count_1w.txt"), "grace 300\nmercy 200\npeace 100\n").unwrap();
        let (url, server) = serve_once("HTTP/1.1 200 OK", "<p>grace mercy peace grace</p>");
        let cfg = config(url, dir.path(), 1);

        run_with_client(&cfg, &local_client(cfg.timeout)).unwrap();
        server.join().unwrap();

        let json = std::fs::read(cfg.json_path.as_ref().unwrap()).unwrap();
        let card: BingoCard = serde_json::from_slice(&json).unwrap();
        let words: BTreeSet<&str> = card.cells().collect();
        assert_eq!(words, BTreeSet::from(["", "mercy", "peace"]));
    }

    #[test]
    fn missing_table_aborts_after_fetch_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (url, server) = serve_once("HTTP/1.1 200 OK", "<p>grace mercy peace grace</p>");
        let cfg = config(url, dir.path(), 3);

        let err = run_with_client(&cfg, &local_client(cfg.timeout)).unwrap_err();
        // the page was served, so the failure came from the side-file
        server.join().unwrap();

        match err.downcast_ref::<BingoError>() {
            Some(BingoError::DataFile { path, .. }) => assert_eq!(path, &cfg.frequencies_path),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!cfg.output_path.exists());
        assert!(!cfg.json_path.as_ref().unwrap().exists());
    }
}
