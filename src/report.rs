//! Frequency report: ranks the words of a finished `Dictionary` by
//! occurrence count and renders the text concordance and the CSV table.
//!
//! Words sharing a count form one group. Groups are ranked from the most
//! frequent down; a group of `n` words after `p` already-ranked words
//! covers ranks `p+1 ..= p+n` and carries their midpoint as its mean rank.
//! Within a group, words keep table storage order.

use std::collections::BTreeMap;
use std::io::Write;

use crate::dictionary::Dictionary;
use crate::error::Result;

/// Column at which the rank range ends in the text report.
const RANK_COLUMN_END: usize = 50;
const MEAN_RANK_WIDTH: usize = 13;
const WORD_WIDTH: usize = 15;
const WORDS_PER_LINE: usize = 5;

/// Run facts the caller knows and the dictionary does not.
#[derive(Clone, Debug)]
pub struct ReportHeader<'a> {
    pub source: &'a str,
    pub total_words: usize,
    pub unique_words: usize,
}

impl<'a> ReportHeader<'a> {
    pub fn new(source: &'a str, total_words: usize, dict: &Dictionary) -> Self {
        Self {
            source,
            total_words,
            unique_words: dict.len(),
        }
    }
}

/// All words that occur exactly `count` times.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyGroup<'a> {
    pub count: usize,
    pub words: Vec<&'a str>,
    pub first_rank: usize,
    pub last_rank: usize,
}

impl<'a> FrequencyGroup<'a> {
    pub fn mean_rank(&self) -> f64 {
        (self.first_rank + self.last_rank) as f64 / 2.0
    }

    /// Mean rank times frequency; roughly constant under Zipf's law.
    pub fn zipf_product(&self) -> f64 {
        self.mean_rank() * self.count as f64
    }

    /// `"a-b"`, or just `"a"` for a group of one.
    pub fn rank_label(&self) -> String {
        if self.first_rank == self.last_rank {
            self.first_rank.to_string()
        } else {
            format!("{}-{}", self.first_rank, self.last_rank)
        }
    }
}

#[derive(Clone, Debug)]
pub struct FrequencyReport<'a> {
    groups: Vec<FrequencyGroup<'a>>,
}

impl<'a> FrequencyReport<'a> {
    pub fn new(dict: &'a Dictionary) -> Self {
        // keyed by count, so memory follows the number of distinct counts
        let mut buckets: BTreeMap<usize, Vec<&'a str>> = BTreeMap::new();
        for (word, count) in dict.iter() {
            buckets.entry(count).or_default().push(word);
        }

        let mut ranked = 0;
        let groups = buckets
            .into_iter()
            .rev()
            .map(|(count, words)| {
                let first_rank = ranked + 1;
                ranked += words.len();
                FrequencyGroup {
                    count,
                    words,
                    first_rank,
                    last_rank: ranked,
                }
            })
            .collect();
        Self { groups }
    }

    /// Groups from most to least frequent.
    pub fn groups(&self) -> &[FrequencyGroup<'a>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Human-readable concordance.
    pub fn write_text<W: Write>(&self, header: &ReportHeader<'_>, out: &mut W) -> Result<()> {
        writeln!(out, "Zipf's Law: word concordance")?;
        writeln!(out, "----------------------------")?;
        writeln!(out, "File:         {}", header.source)?;
        writeln!(out, "Total Words:  {}", header.total_words)?;
        writeln!(out, "Unique Words: {}", header.unique_words)?;
        writeln!(out)?;

        let pad = RANK_COLUMN_END - "Ranks".len();
        write!(
            out,
            "{:<pad$}{}{:>w$}\n{:<pad$}{}{:>w$}",
            "Word Frequencies",
            "Ranks",
            "Avg Rank",
            "----------------",
            "-----",
            "--------",
            pad = pad,
            w = MEAN_RANK_WIDTH,
        )?;

        for g in &self.groups {
            let label = format!(
                "Words occurring {} time{}:",
                g.count,
                if g.count == 1 { "" } else { "s" }
            );
            write!(
                out,
                "\n\n{}{:>rw$}{:>mw$.1}",
                label,
                g.rank_label(),
                g.mean_rank(),
                rw = RANK_COLUMN_END.saturating_sub(label.len()),
                mw = MEAN_RANK_WIDTH,
            )?;
            for (j, word) in g.words.iter().enumerate() {
                if j % WORDS_PER_LINE == 0 {
                    writeln!(out)?;
                }
                write!(out, "{:<w$}", word, w = WORD_WIDTH)?;
            }
        }
        writeln!(out)?;
        Ok(())
    }

    /// `mean rank, frequency, mean rank x frequency`, one row per group.
    pub fn write_csv<W: Write>(&self, header: &ReportHeader<'_>, out: &mut W) -> Result<()> {
        writeln!(out, "Zipf's Law,rank * freq = const")?;
        writeln!(out)?;
        writeln!(out, "File,{}", csv_field(header.source))?;
        writeln!(out, "Total Words,{}", header.total_words)?;
        writeln!(out, "Unique Words,{}", header.unique_words)?;
        writeln!(out)?;
        writeln!(out, "Rank,Frequency,Rank x Frequency")?;
        for g in &self.groups {
            writeln!(out, "{:.1},{},{:.1}", g.mean_rank(), g.count, g.zipf_product())?;
        }
        Ok(())
    }
}

fn csv_field(s: &str) -> std::borrow::Cow<'_, str> {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\"")).into()
    } else {
        s.into()
    }
}
