use std::collections::{HashMap, HashSet};
use std::f32::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::EmbedConfig;
use crate::util::stable_pair;

use super::model::{Area, DataSet, Paper};
use super::parse::{
    RawArea, RawPaper, make_safe_id, parse_comments, parse_keywords, parse_payload, parse_tags,
    value_as_count, value_as_f64, value_as_flag, value_as_string,
};
use super::streams::{DEFAULT_STREAM_COUNT, build_streams};

const UNASSIGNED_AREA: &str = "unassigned";

pub fn resolve_data_path(config: &EmbedConfig) -> Result<PathBuf> {
    let file = config
        .files
        .first()
        .ok_or_else(|| anyhow!("no data file configured"))?;

    let path = Path::new(&file.file);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let base = config.server_url.as_deref().unwrap_or(".");
    Ok(Path::new(base).join(path))
}

pub fn load_dataset(config: &EmbedConfig) -> Result<DataSet> {
    let path = resolve_data_path(config)?;
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read data file {}", path.display()))?;

    let dataset = build_dataset(&raw)
        .with_context(|| format!("failed to load data file {}", path.display()))?;

    info!(
        path = %path.display(),
        papers = dataset.papers.len(),
        areas = dataset.areas.len(),
        streams = dataset.streams.streams.len(),
        "loaded dataset"
    );

    Ok(dataset)
}

pub fn build_dataset(raw: &str) -> Result<DataSet> {
    let payload = parse_payload(raw)?;

    let mut papers = Vec::with_capacity(payload.papers.len());
    let mut pending_positions = Vec::new();
    let mut seen = HashSet::new();
    for (index, value) in payload.papers.into_iter().enumerate() {
        let raw_paper = match RawPaper::deserialize(&value) {
            Ok(raw_paper) => raw_paper,
            Err(error) => {
                warn!(index, %error, "skipping malformed document");
                continue;
            }
        };

        match convert_paper(raw_paper) {
            Some((paper, _)) if seen.contains(&paper.safe_id) => {
                warn!(index, safe_id = %paper.safe_id, "skipping duplicate document");
            }
            Some((paper, has_position)) => {
                seen.insert(paper.safe_id.clone());
                if !has_position {
                    pending_positions.push(papers.len());
                }
                papers.push(paper);
            }
            None => warn!(index, "skipping document without id"),
        }
    }

    if papers.is_empty() {
        return Err(anyhow!("data file contains no usable documents"));
    }

    let mut areas = match payload.areas {
        Some(raw_areas) => explicit_areas(raw_areas, &papers, &pending_positions),
        None => derived_areas(&papers, &pending_positions),
    };
    attach_members(&mut areas, &papers);
    place_unpositioned_papers(&mut papers, &areas, &pending_positions);

    let streams = build_streams(&papers, DEFAULT_STREAM_COUNT);

    let mut dataset = DataSet::new(papers, areas, streams);
    dataset.timestamp = payload.timestamp;
    dataset.service = payload.service;
    dataset.query = payload.query;
    Ok(dataset)
}

fn convert_paper(raw: RawPaper) -> Option<(Paper, bool)> {
    let id = raw.id.as_ref().and_then(value_as_string);
    let safe_id = raw
        .safe_id
        .filter(|safe_id| !safe_id.trim().is_empty())
        .or_else(|| id.as_deref().map(make_safe_id))?;
    let id = id.unwrap_or_else(|| safe_id.clone());

    let x = raw.x.as_ref().and_then(value_as_f64);
    let y = raw.y.as_ref().and_then(value_as_f64);
    let has_position = x.is_some() && y.is_some();

    let readers = raw.readers_mendeley.as_ref().and_then(value_as_count);
    let num_readers = raw
        .num_readers
        .as_ref()
        .and_then(value_as_count)
        .or(readers)
        .unwrap_or(0);

    let area_uri = raw
        .area_uri
        .as_ref()
        .and_then(value_as_string)
        .unwrap_or_else(|| UNASSIGNED_AREA.to_owned());

    let paper = Paper {
        id,
        safe_id,
        title: raw.title.unwrap_or_default().trim().to_owned(),
        authors: raw.authors.unwrap_or_default().trim().to_owned(),
        published_in: raw
            .published_in
            .map(|source| source.trim().to_owned())
            .filter(|source| !source.is_empty()),
        year: raw.year.as_ref().and_then(value_as_string),
        paper_abstract: raw.paper_abstract.unwrap_or_default().trim().to_owned(),
        result_type: raw.resulttype.as_ref().and_then(|value| match value {
            serde_json::Value::Array(items) => items.first().and_then(value_as_string),
            other => value_as_string(other),
        }),
        oa: raw.oa.as_ref().is_some_and(value_as_flag),
        free_access: raw.free_access.as_ref().is_some_and(value_as_flag),
        citation_count: raw.citation_count.as_ref().and_then(value_as_count),
        readers,
        tweets: raw.cited_by_tweeters_count.as_ref().and_then(value_as_count),
        num_readers,
        area: raw
            .area
            .map(|area| area.trim().to_owned())
            .unwrap_or_default(),
        area_uri,
        position: [x.unwrap_or(0.0) as f32, y.unwrap_or(0.0) as f32],
        keywords: raw.subject.as_ref().map(parse_keywords).unwrap_or_default(),
        url: raw.url.filter(|url| !url.trim().is_empty()),
        doi: raw.doi.filter(|doi| !doi.trim().is_empty()),
        link: raw.link.filter(|link| !link.trim().is_empty()),
        comments: raw.comments.as_ref().map(parse_comments).unwrap_or_default(),
        tags: raw.tags.as_ref().map(parse_tags).unwrap_or_default(),
    };

    Some((paper, has_position))
}

fn explicit_areas(
    raw_areas: Vec<serde_json::Value>,
    papers: &[Paper],
    unpositioned: &[usize],
) -> Vec<Area> {
    let derived = derived_areas(papers, unpositioned);
    let mut areas = Vec::with_capacity(raw_areas.len());

    for (index, value) in raw_areas.into_iter().enumerate() {
        let raw = match RawArea::deserialize(&value) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(index, %error, "skipping malformed area");
                continue;
            }
        };
        let Some(uri) = raw.area_uri.as_ref().and_then(value_as_string) else {
            warn!(index, "skipping area without area_uri");
            continue;
        };

        let fallback = derived.iter().find(|area| area.uri == uri);
        let position = match (
            raw.x.as_ref().and_then(value_as_f64),
            raw.y.as_ref().and_then(value_as_f64),
        ) {
            (Some(x), Some(y)) => [x as f32, y as f32],
            _ => fallback
                .map(|area| area.position)
                .unwrap_or_else(|| circle_position(index, 0)),
        };

        areas.push(Area {
            title: raw
                .title
                .filter(|title| !title.trim().is_empty())
                .or_else(|| fallback.map(|area| area.title.clone()))
                .unwrap_or_else(|| uri.clone()),
            size: raw
                .size
                .as_ref()
                .and_then(value_as_f64)
                .map(|size| size as f32)
                .or_else(|| fallback.map(|area| area.size))
                .unwrap_or(0.0),
            uri,
            position,
            papers: Vec::new(),
        });
    }

    // Papers pointing at an area the payload did not list still need a bubble.
    for area in derived {
        if !areas.iter().any(|known| known.uri == area.uri) {
            areas.push(area);
        }
    }

    areas
}

fn derived_areas(papers: &[Paper], unpositioned: &[usize]) -> Vec<Area> {
    struct Accumulator {
        title: String,
        sum: [f32; 2],
        positioned: usize,
        count: usize,
    }

    let mut order = Vec::new();
    let mut by_uri: HashMap<&str, Accumulator> = HashMap::new();

    for (index, paper) in papers.iter().enumerate() {
        let entry = by_uri.entry(paper.area_uri.as_str()).or_insert_with(|| {
            order.push(paper.area_uri.as_str());
            Accumulator {
                title: String::new(),
                sum: [0.0, 0.0],
                positioned: 0,
                count: 0,
            }
        });

        if entry.title.is_empty() && !paper.area.is_empty() {
            entry.title = paper.area.clone();
        }
        if !unpositioned.contains(&index) {
            entry.sum[0] += paper.position[0];
            entry.sum[1] += paper.position[1];
            entry.positioned += 1;
        }
        entry.count += 1;
    }

    let total = order.len();
    order
        .into_iter()
        .enumerate()
        .filter_map(|(index, uri)| {
            let entry = by_uri.remove(uri)?;
            let position = if entry.positioned > 0 {
                [
                    entry.sum[0] / entry.positioned as f32,
                    entry.sum[1] / entry.positioned as f32,
                ]
            } else {
                circle_position(index, total)
            };

            Some(Area {
                uri: uri.to_owned(),
                title: if entry.title.is_empty() {
                    uri.to_owned()
                } else {
                    entry.title
                },
                position,
                size: entry.count as f32,
                papers: Vec::new(),
            })
        })
        .collect()
}

fn circle_position(index: usize, total: usize) -> [f32; 2] {
    if total <= 1 {
        return [0.0, 0.0];
    }

    let angle = (index as f32 / total as f32) * TAU;
    [angle.cos(), angle.sin()]
}

fn attach_members(areas: &mut [Area], papers: &[Paper]) {
    for area in areas.iter_mut() {
        area.papers = papers
            .iter()
            .filter(|paper| paper.area_uri == area.uri)
            .map(|paper| paper.safe_id.clone())
            .collect();
        if area.size <= 0.0 {
            area.size = area.papers.len() as f32;
        }
    }
}

fn map_extent(areas: &[Area]) -> f32 {
    let (mut min, mut max) = ([f32::MAX; 2], [f32::MIN; 2]);
    for area in areas {
        for axis in 0..2 {
            min[axis] = min[axis].min(area.position[axis]);
            max[axis] = max[axis].max(area.position[axis]);
        }
    }

    let extent = (max[0] - min[0]).max(max[1] - min[1]);
    if extent.is_finite() && extent > f32::EPSILON {
        extent
    } else {
        1.0
    }
}

fn place_unpositioned_papers(papers: &mut [Paper], areas: &[Area], pending: &[usize]) {
    if pending.is_empty() {
        return;
    }

    let spread = map_extent(areas) * 0.06;
    for &index in pending {
        let Some(paper) = papers.get_mut(index) else {
            continue;
        };
        let center = areas
            .iter()
            .find(|area| area.uri == paper.area_uri)
            .map(|area| area.position)
            .unwrap_or([0.0, 0.0]);
        let (jx, jy) = stable_pair(&paper.safe_id);
        paper.position = [center[0] + jx * spread, center[1] + jy * spread];
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::DataFile;

    fn payload() -> String {
        json!({
            "context": { "service": "base", "timestamp": "2020-07-09 18:20:14" },
            "documents": [
                {
                    "id": "doc:1", "title": " Ottoman history ", "authors": "Hammer-Purgstall, Joseph",
                    "year": 1830, "area_uri": 1, "area": "Orient", "x": "10", "y": "20",
                    "oa": "true", "readers.mendeley": "7", "subject": "Orient; History"
                },
                {
                    "id": "doc:2", "title": "Persian poetry", "area_uri": 1,
                    "x": 30, "y": 40, "num_readers": 3
                },
                {
                    "id": "doc:3", "title": "Unplaced", "area_uri": 2, "area": "Poetry"
                },
                { "title": "no id" },
                "not an object"
            ]
        })
        .to_string()
    }

    #[test]
    fn builds_papers_and_derived_areas() {
        let dataset = build_dataset(&payload()).expect("valid payload");

        assert_eq!(dataset.papers.len(), 3);
        assert_eq!(dataset.service.as_deref(), Some("base"));
        assert_eq!(dataset.timestamp.as_deref(), Some("2020-07-09 18:20:14"));

        let first = dataset.paper("doc-1").expect("safe id derived from id");
        assert_eq!(first.title, "Ottoman history");
        assert!(first.oa);
        assert_eq!(first.readers, Some(7));
        assert_eq!(first.num_readers, 7);
        assert_eq!(first.year.as_deref(), Some("1830"));
        assert_eq!(first.keywords, vec!["Orient", "History"]);

        let orient = dataset.area("1").expect("area 1");
        assert_eq!(orient.title, "Orient");
        assert_eq!(orient.papers, vec!["doc-1", "doc-2"]);
        assert_eq!(orient.size, 2.0);
        assert_eq!(orient.position, [20.0, 30.0]);
    }

    #[test]
    fn unpositioned_papers_are_placed_deterministically() {
        let first = build_dataset(&payload()).expect("valid payload");
        let second = build_dataset(&payload()).expect("valid payload");

        let placed = first.paper("doc-3").expect("doc 3");
        assert_eq!(
            placed.position,
            second.paper("doc-3").expect("doc 3").position
        );
        assert!(placed.position.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn explicit_areas_override_derived_values() {
        let raw = json!({
            "documents": [
                { "id": "a", "area_uri": "x", "x": 0, "y": 0 },
                { "id": "b", "area_uri": "y", "x": 1, "y": 1 }
            ],
            "areas": [
                { "area_uri": "x", "title": "Explicit", "x": 5, "y": 6, "size": 12 }
            ]
        })
        .to_string();

        let dataset = build_dataset(&raw).expect("valid payload");
        assert_eq!(dataset.areas.len(), 2);

        let explicit = dataset.area("x").expect("explicit area");
        assert_eq!(explicit.title, "Explicit");
        assert_eq!(explicit.position, [5.0, 6.0]);
        assert_eq!(explicit.size, 12.0);
        assert_eq!(explicit.papers, vec!["a"]);

        assert!(dataset.area("y").is_some());
    }

    #[test]
    fn duplicate_documents_keep_the_first() {
        let raw = json!([
            { "id": "a", "title": "First", "area_uri": "x", "x": 0, "y": 0 },
            { "id": "a", "title": "Second", "area_uri": "y", "x": 1, "y": 1 },
            { "id": "b", "title": "Other", "area_uri": "x", "x": 2, "y": 2 }
        ])
        .to_string();

        let dataset = build_dataset(&raw).expect("valid payload");
        assert_eq!(dataset.papers.len(), 2);
        assert_eq!(dataset.paper("a").expect("paper a").title, "First");
        assert_eq!(dataset.area("x").expect("area x").papers, vec!["a", "b"]);
        assert!(dataset.area("y").is_none());
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(build_dataset("[]").is_err());
        assert!(build_dataset(r#"[{"title": "no id"}]"#).is_err());
    }

    #[test]
    fn relative_data_file_resolves_against_server_url() {
        let config = EmbedConfig {
            files: vec![DataFile {
                title: "query".to_owned(),
                file: "data/result.json".to_owned(),
            }],
            server_url: Some("/srv/headstart".to_owned()),
            ..EmbedConfig::default()
        };

        assert_eq!(
            resolve_data_path(&config).expect("configured file"),
            PathBuf::from("/srv/headstart/data/result.json")
        );
        assert!(resolve_data_path(&EmbedConfig::default()).is_err());
    }
}
