use std::collections::{HashMap, HashSet};

use super::model::{Paper, keyword_key};

pub const DEFAULT_STREAM_COUNT: usize = 10;

/// One keyword stream: documents per year carrying the keyword.
#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    pub name: String,
    pub counts: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamGraph {
    pub years: Vec<i32>,
    pub streams: Vec<Stream>,
}

/// Vertical extent of a stream at one year, in the range `-0.5..=0.5`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamBand {
    pub lower: f32,
    pub upper: f32,
}

struct KeywordTally {
    name: String,
    total: u32,
    counts: Vec<u32>,
}

pub fn build_streams(papers: &[Paper], limit: usize) -> StreamGraph {
    let dated = papers
        .iter()
        .filter_map(|paper| paper.year_number().map(|year| (year, paper)))
        .collect::<Vec<_>>();

    let (Some(first), Some(last)) = (
        dated.iter().map(|(year, _)| *year).min(),
        dated.iter().map(|(year, _)| *year).max(),
    ) else {
        return StreamGraph::default();
    };

    let years = (first..=last).collect::<Vec<_>>();
    let mut tallies: HashMap<String, KeywordTally> = HashMap::new();

    for (year, paper) in &dated {
        let year_index = (*year - first) as usize;
        let mut seen = HashSet::new();
        for keyword in &paper.keywords {
            let key = keyword_key(keyword);
            if !seen.insert(key.clone()) {
                continue;
            }
            let tally = tallies.entry(key).or_insert_with(|| KeywordTally {
                name: keyword.clone(),
                total: 0,
                counts: vec![0; years.len()],
            });
            tally.total += 1;
            tally.counts[year_index] += 1;
        }
    }

    let mut ranked = tallies.into_values().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);

    let streams = ranked
        .into_iter()
        .map(|tally| Stream {
            name: tally.name,
            counts: tally.counts,
        })
        .collect();

    StreamGraph { years, streams }
}

impl StreamGraph {
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty() || self.years.is_empty()
    }

    /// Stacks the streams per year, each year normalized to a total height of
    /// one and centred on zero. Indexed as `[stream][year]`.
    pub fn stacked_bands(&self) -> Vec<Vec<StreamBand>> {
        let mut bands = vec![Vec::with_capacity(self.years.len()); self.streams.len()];

        for year_index in 0..self.years.len() {
            let total = self
                .streams
                .iter()
                .map(|stream| stream.counts.get(year_index).copied().unwrap_or(0))
                .sum::<u32>();

            let mut cursor = -0.5_f32;
            for (stream_index, stream) in self.streams.iter().enumerate() {
                let count = stream.counts.get(year_index).copied().unwrap_or(0);
                let height = if total == 0 {
                    0.0
                } else {
                    count as f32 / total as f32
                };
                let lower = if total == 0 { 0.0 } else { cursor };
                bands[stream_index].push(StreamBand {
                    lower,
                    upper: lower + height,
                });
                cursor += height;
            }
        }

        bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support;

    fn stream<'a>(graph: &'a StreamGraph, name: &str) -> &'a Stream {
        graph
            .streams
            .iter()
            .find(|stream| stream.name == name)
            .expect("stream")
    }

    fn paper(id: &str, year: &str, keywords: &[&str]) -> Paper {
        let mut paper = test_support::paper(id, "area");
        paper.year = Some(year.to_owned());
        paper.keywords = keywords.iter().map(|keyword| (*keyword).to_owned()).collect();
        paper
    }

    #[test]
    fn streams_cover_full_year_range() {
        let papers = vec![
            paper("a", "1820", &["Orient"]),
            paper("b", "1823", &["orient", "Poetry"]),
            paper("c", "1823-05-01", &["Poetry"]),
        ];

        let graph = build_streams(&papers, DEFAULT_STREAM_COUNT);
        assert_eq!(graph.years, vec![1820, 1821, 1822, 1823]);

        let orient = stream(&graph, "Orient");
        assert_eq!(orient.counts, vec![1, 0, 0, 1]);

        let poetry = stream(&graph, "Poetry");
        assert_eq!(poetry.counts, vec![0, 0, 0, 2]);
    }

    #[test]
    fn streams_are_limited_by_document_count() {
        let papers = vec![
            paper("a", "2000", &["x", "y"]),
            paper("b", "2001", &["x"]),
            paper("c", "2001", &["z"]),
        ];

        let graph = build_streams(&papers, 1);
        assert_eq!(graph.streams.len(), 1);
        assert_eq!(graph.streams[0].name, "x");
    }

    #[test]
    fn keyword_repeated_in_another_case_counts_once() {
        let papers = vec![
            paper("a", "2000", &["Ökonomie", "ökonomie"]),
            paper("b", "2001", &["ÖKONOMIE"]),
        ];

        let graph = build_streams(&papers, DEFAULT_STREAM_COUNT);
        assert_eq!(graph.streams.len(), 1);
        assert_eq!(graph.streams[0].name, "Ökonomie");
        assert_eq!(graph.streams[0].counts, vec![1, 1]);
    }

    #[test]
    fn undated_papers_produce_no_streams() {
        let mut undated = paper("a", "", &["x"]);
        undated.year = None;
        assert!(build_streams(&[undated], 5).is_empty());
    }

    #[test]
    fn bands_are_relative_per_year() {
        let graph = StreamGraph {
            years: vec![2000, 2001],
            streams: vec![
                Stream {
                    name: "a".to_owned(),
                    counts: vec![1, 0],
                },
                Stream {
                    name: "b".to_owned(),
                    counts: vec![3, 0],
                },
            ],
        };

        let bands = graph.stacked_bands();
        assert_eq!(bands[0][0], StreamBand { lower: -0.5, upper: -0.25 });
        assert_eq!(bands[1][0], StreamBand { lower: -0.25, upper: 0.5 });
        assert_eq!(bands[0][1], StreamBand { lower: 0.0, upper: 0.0 });
    }
}
