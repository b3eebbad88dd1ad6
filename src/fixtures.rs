// src/fixtures.rs
// Publication-list fixtures shaped like a research group's bibliography:
// keywords for selection, attached files, LaTeX accents and month macros.

/// Venue macros shared by the generated records
pub static VENUE_STRINGS: &str = r#"
@string{neurips = "Advances in Neural Information Processing Systems"}
@string{jmlr = "Journal of Machine Learning Research"}
@string{springer = "Springer"}
"#;

/// One template record per citation shape
pub struct PublicationTemplate {
    pub shape: &'static str,
    pub content: &'static str,
}

pub const PUBLICATION_TEMPLATES: &[PublicationTemplate] = &[
    PublicationTemplate {
        shape: "journal",
        content: r#"@article{KEY,
    author = {M{\"u}ller, Anna and Smith, John Q. and Garc{\'\i}a, Luis},
    title = {{Sparse Attention for Long--Range Retrieval}},
    journal = jmlr,
    volume = {25},
    number = {3},
    pages = {123--187},
    year = {YEAR},
    month = mar,
    doi = {10.5555/jmlr.KEY},
    keywords = {muc.dai,nlp},
    file = {:papers/KEY.pdf:PDF}
}"#,
    },
    PublicationTemplate {
        shape: "conference",
        content: r#"@inproceedings{KEY,
    author = {Alice Williams and Bob Brown},
    title = {Efficient Vision Transformers on the Edge},
    booktitle = neurips # { 36},
    pages = {5678--5689},
    year = {YEAR},
    publisher = {Curran Associates},
    url = {https://example.org/KEY},
    keywords = {vision}
}"#,
    },
    PublicationTemplate {
        shape: "book",
        content: r#"@book{KEY,
    author = {Knuth, Donald E.},
    title = {The Art of Computer Programming},
    volume = {1},
    publisher = springer,
    year = {YEAR},
    keywords = {muc.dai,classics}
}"#,
    },
    PublicationTemplate {
        shape: "preprint",
        content: r#"@misc{KEY,
    author = {Sarah Taylor},
    title = {Scaling Laws for {\AA}ngstr{\"o}m-Scale Simulation},
    year = {YEAR},
    note = {arXiv:2403.12345}
}"#,
    },
];

/// Generate a bibliography with `n_entries` records cycling through the
/// templates, with unique keys and years spread over a decade
pub fn generate_publication_bib(n_entries: usize) -> String {
    let mut bib = String::with_capacity(n_entries * 400);
    bib.push_str(VENUE_STRINGS);
    bib.push('\n');

    for i in 0..n_entries {
        let template = &PUBLICATION_TEMPLATES[i % PUBLICATION_TEMPLATES.len()];
        let record = template
            .content
            .replace("KEY", &format!("{}{i}", template.shape))
            .replace("YEAR", &(2015 + i % 10).to_string());
        bib.push_str(&record);
        bib.push_str("\n\n");
    }

    bib
}
