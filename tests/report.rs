// End-to-end: tokenize, count, rank, and render both report artifacts.
use zipf_dict::{words, Dictionary, FrequencyReport, ReportHeader};

fn count(text: &str) -> (Dictionary, usize) {
    let mut d = Dictionary::new();
    let total = d.insert_all(words(text.as_bytes()));
    (d, total)
}

#[test]
fn counts_ranks_and_mean_ranks() {
    let (d, total) = count("the quick the fox the quick");
    assert_eq!(total, 6);
    assert_eq!(d.len(), 3);
    assert_eq!(d.find("the"), 3);
    assert_eq!(d.find("quick"), 2);
    assert_eq!(d.find("fox"), 1);

    let r = FrequencyReport::new(&d);
    let summary: Vec<(usize, Vec<&str>, String, f64)> = r
        .groups()
        .iter()
        .map(|g| (g.count, g.words.clone(), g.rank_label(), g.mean_rank()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (3, vec!["the"], "1".to_string(), 1.0),
            (2, vec!["quick"], "2".to_string(), 2.0),
            (1, vec!["fox"], "3".to_string(), 3.0),
        ]
    );
}

#[test]
fn text_report_end_to_end() {
    let (d, total) = count("The quick, the fox; THE quick.");
    let r = FrequencyReport::new(&d);
    let mut out = Vec::new();
    r.write_text(&ReportHeader::new("fox.txt", total, &d), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let expected = [
        "Zipf's Law: word concordance",
        "----------------------------",
        "File:         fox.txt",
        "Total Words:  6",
        "Unique Words: 3",
        "",
        "Word Frequencies                             Ranks     Avg Rank",
        "----------------                             -----     --------",
        "",
        "Words occurring 3 times:                         1          1.0",
        "the            ",
        "",
        "Words occurring 2 times:                         2          2.0",
        "quick          ",
        "",
        "Words occurring 1 time:                          3          3.0",
        "fox            ",
    ];
    assert_eq!(text.lines().collect::<Vec<_>>(), expected);
    assert!(text.ends_with('\n'));
}

#[test]
fn csv_report_end_to_end() {
    let (d, total) = count("a a a a a the the the the the quick quick quick");
    let r = FrequencyReport::new(&d);
    let mut out = Vec::new();
    r.write_csv(&ReportHeader::new("tie.txt", total, &d), &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    let rows: Vec<&str> = csv.lines().skip_while(|l| !l.starts_with("Rank,")).collect();
    assert_eq!(rows, ["Rank,Frequency,Rank x Frequency", "1.5,5,7.5", "3.0,3,9.0"]);
    assert!(csv.contains("Total Words,13\n"));
    assert!(csv.contains("Unique Words,3\n"));
}

#[test]
fn empty_input_has_no_groups() {
    let (d, total) = count("  -- 123 ''' ");
    assert_eq!(total, 0);
    assert_eq!(d.len(), 0);
    let r = FrequencyReport::new(&d);
    assert!(r.is_empty());

    let mut out = Vec::new();
    r.write_text(&ReportHeader::new("blank.txt", total, &d), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("Words occurring"));
    assert!(text.contains("Unique Words: 0\n"));
}
