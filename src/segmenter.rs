//! Splitting text into mode segments.
//!
//! [`Segmenter::optimize`] finds the partition of a string into Numeric,
//! Alphanumeric, Byte and Kanji segments with the fewest total bits at a given
//! version. The text is first cut into maximal runs of one character class;
//! each run may then be coded in its own mode or any wider one, and a layered
//! shortest-path search picks one mode per run.

use crate::error::{QrError, Result};
use crate::kanji::{self, ToSjis};
use crate::options::{SegmentData, SegmentInput};
use crate::qrcode::Version;
use crate::segment::{QrSegment, QrSegmentMode};

/// A maximal run of characters sharing one class, as a byte range of the input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Run {
    mode: QrSegmentMode,
    start: usize,
    end: usize,
}

/// One way to code a run: the mode and the character count in that mode.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    mode: QrSegmentMode,
    start: usize,
    end: usize,
    len: usize,
}

/// Best known way to reach a candidate.
#[derive(Clone, Copy, Debug)]
struct Step {
    cost: usize,
    // Characters already coded in this candidate's mode, counting back to the
    // last mode switch.
    run_len: usize,
    prev: usize,
}

/// Builds segments from text or explicit segment descriptions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Segmenter {
    to_sjis: Option<ToSjis>,
}

impl Segmenter {
    /// Creates a segmenter; Kanji mode is enabled only with a mapping.
    pub fn new(to_sjis: Option<ToSjis>) -> Self {
        Self { to_sjis }
    }

    fn classify(&self, c: char) -> QrSegmentMode {
        if c.is_ascii_digit() {
            QrSegmentMode::Numeric
        } else if QrSegment::is_alphanumeric(c.encode_utf8(&mut [0u8; 4])) {
            QrSegmentMode::Alphanumeric
        } else if self.to_sjis.is_some_and(|f| kanji::is_kanji(c, f)) {
            QrSegmentMode::Kanji
        } else {
            QrSegmentMode::Byte
        }
    }

    fn runs(&self, text: &str) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for (i, c) in text.char_indices() {
            let mode = self.classify(c);
            let end = i + c.len_utf8();
            match runs.last_mut() {
                Some(run) if run.mode == mode => run.end = end,
                _ => runs.push(Run {
                    mode,
                    start: i,
                    end,
                }),
            }
        }
        runs
    }

    /// Splits `text` into runs coded in their own narrowest mode.
    ///
    /// The result is not optimal; it only serves to estimate the version.
    pub fn raw_split(&self, text: &str) -> Result<Vec<QrSegment>> {
        self.runs(text)
            .into_iter()
            .map(|run| self.build(&text[run.start..run.end], run.mode))
            .collect()
    }

    /// Returns the segments encoding `text` in the fewest bits at `version`.
    pub fn optimize(&self, text: &str, version: Version) -> Result<Vec<QrSegment>> {
        let groups: Vec<Vec<Candidate>> = self
            .runs(text)
            .iter()
            .map(|run| candidates(run, text))
            .collect();
        let chosen = shortest_path(&groups, version);

        let mut merged: Vec<Candidate> = Vec::with_capacity(chosen.len());
        for cand in chosen {
            match merged.last_mut() {
                Some(last) if last.mode == cand.mode => last.end = cand.end,
                _ => merged.push(cand),
            }
        }
        merged
            .into_iter()
            .map(|cand| self.build(&text[cand.start..cand.end], cand.mode))
            .collect()
    }

    /// Builds one segment per explicit input, inferring missing modes.
    ///
    /// Inputs with empty data are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::NoInput`] if nothing is left to encode, or
    /// [`QrError::ModeMismatch`] if a requested mode cannot hold its data.
    pub fn from_inputs(&self, inputs: &[SegmentInput]) -> Result<Vec<QrSegment>> {
        let mut segs = Vec::with_capacity(inputs.len());
        for input in inputs.iter().filter(|input| !input.data().is_empty()) {
            let seg = match (input.data(), input.mode()) {
                (SegmentData::Bytes(bytes), None | Some(QrSegmentMode::Byte)) => {
                    QrSegment::make_bytes(bytes)
                }
                (SegmentData::Bytes(bytes), Some(mode)) => {
                    let text = core::str::from_utf8(bytes).map_err(|_| QrError::ModeMismatch {
                        data: String::from_utf8_lossy(bytes).into_owned(),
                        mode,
                        suggested: QrSegmentMode::Byte,
                    })?;
                    self.build(text, mode)?
                }
                (SegmentData::Text(text), mode) => {
                    let mode = mode.unwrap_or_else(|| QrSegmentMode::best_for(text, self.to_sjis));
                    self.build(text, mode)?
                }
            };
            segs.push(seg);
        }
        if segs.is_empty() {
            return Err(QrError::NoInput);
        }
        Ok(segs)
    }

    fn build(&self, text: &str, mode: QrSegmentMode) -> Result<QrSegment> {
        match (mode, self.to_sjis) {
            (QrSegmentMode::Numeric, _) => QrSegment::make_numeric(text),
            (QrSegmentMode::Alphanumeric, _) => QrSegment::make_alphanumeric(text),
            (QrSegmentMode::Kanji, Some(f)) => QrSegment::make_kanji(text, f),
            // Kanji without a mapping is written as Byte.
            (QrSegmentMode::Kanji, None) | (QrSegmentMode::Byte, _) => {
                Ok(QrSegment::make_bytes(text.as_bytes()))
            }
        }
    }
}

// Numeric runs may also be coded as Alphanumeric or Byte, Alphanumeric and
// Kanji runs as Byte. The run's own mode comes first so ties keep it.
fn candidates(run: &Run, text: &str) -> Vec<Candidate> {
    let slice = &text[run.start..run.end];
    let chars = slice.chars().count();
    let make = |mode: QrSegmentMode, len: usize| Candidate {
        mode,
        start: run.start,
        end: run.end,
        len,
    };
    let bytes = make(QrSegmentMode::Byte, slice.len());
    match run.mode {
        QrSegmentMode::Numeric => vec![
            make(QrSegmentMode::Numeric, chars),
            make(QrSegmentMode::Alphanumeric, chars),
            bytes,
        ],
        QrSegmentMode::Alphanumeric => vec![make(QrSegmentMode::Alphanumeric, chars), bytes],
        QrSegmentMode::Kanji => vec![make(QrSegmentMode::Kanji, chars), bytes],
        QrSegmentMode::Byte => vec![bytes],
    }
}

fn header_bits(mode: QrSegmentMode, version: Version) -> usize {
    4 + usize::from(mode.num_char_count_bits(version))
}

fn shortest_path(groups: &[Vec<Candidate>], version: Version) -> Vec<Candidate> {
    let Some(first) = groups.first() else {
        return Vec::new();
    };

    let mut table: Vec<Vec<Step>> = Vec::with_capacity(groups.len());
    table.push(
        first
            .iter()
            .map(|cand| Step {
                cost: cand.mode.bit_length(cand.len) + header_bits(cand.mode, version),
                run_len: cand.len,
                prev: 0,
            })
            .collect(),
    );

    for pair in groups.windows(2) {
        let (prev_group, group) = (&pair[0], &pair[1]);
        let prev_steps = &table[table.len() - 1];
        let steps: Vec<Step> = group
            .iter()
            .map(|cand| {
                let mut best = Step {
                    cost: usize::MAX,
                    run_len: 0,
                    prev: 0,
                };
                for (i, (prev, step)) in prev_group.iter().zip(prev_steps).enumerate() {
                    let (edge, run_len) = if prev.mode == cand.mode {
                        let run_len = step.run_len + cand.len;
                        let edge = cand.mode.bit_length(run_len) - cand.mode.bit_length(step.run_len);
                        (edge, run_len)
                    } else {
                        let edge = cand.mode.bit_length(cand.len) + header_bits(cand.mode, version);
                        (edge, cand.len)
                    };
                    let cost = step.cost + edge;
                    if cost < best.cost {
                        best = Step {
                            cost,
                            run_len,
                            prev: i,
                        };
                    }
                }
                best
            })
            .collect();
        table.push(steps);
    }

    let last = &table[table.len() - 1];
    let mut idx = 0;
    for (i, step) in last.iter().enumerate().skip(1) {
        if step.cost < last[idx].cost {
            idx = i;
        }
    }

    let mut chosen = Vec::with_capacity(groups.len());
    for (group, steps) in groups.iter().zip(&table).rev() {
        chosen.push(group[idx]);
        idx = steps[idx].prev;
    }
    chosen.reverse();
    chosen
}
