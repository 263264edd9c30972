use crate::config::Config;
use anyhow::Context;
use glam::Vec2;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

/// built-in map, used when no map file is given
pub const DEFAULT_MAP: &str = include_str!("../map/default.map");

/// Square tile grid. Row-major, `true` is solid.
#[derive(Clone, PartialEq, Debug)]
pub struct GridModel {
    size: usize,
    tiles: Vec<bool>,
    tile_size: f32,
    spawn: Option<(usize, usize)>,
}

impl GridModel {
    /// build a grid from rows, checking only that it is square
    pub fn new(rows: Vec<Vec<bool>>, tile_size: f32) -> anyhow::Result<Self> {
        let size = rows.len();
        if size == 0 {
            anyhow::bail!("grid has no rows");
        }
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            anyhow::bail!(
                "grid is not square: row {idx} has {} tiles, expected {size}",
                row.len()
            );
        }
        if !(tile_size > 0.) {
            anyhow::bail!("tile size must be positive, got {tile_size}");
        }

        Ok(Self {
            size,
            tiles: rows.into_iter().flatten().collect(),
            tile_size,
            spawn: None,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("loading map at {}", path.display());
        let file = read_to_string(path)
            .with_context(|| format!("could not read map {}", path.display()))?;
        Self::parse(&file).with_context(|| format!("invalid map {}", path.display()))
    }

    /// parse a map file and require a solid border ring
    pub fn parse(src: &str) -> anyhow::Result<Self> {
        let mut lines = src.lines();
        let mut tile_size = None;
        let mut main = None;

        while let Some(line) = lines.by_ref().next() {
            match line.trim_end() {
                "" => continue,
                "!!!!META" => {
                    let meta = parse_meta(&mut lines)?;
                    tile_size = meta.or(tile_size);
                }
                "!!!!MAIN" => main = Some(parse_main(&mut lines)?),
                other => anyhow::bail!("unrecognized directive: {other}"),
            }
        }

        let (rows, spawn) = main.context("map has no !!!!MAIN block")?;
        let tile_size = tile_size.unwrap_or_else(|| Config::default().tile_size);
        let mut this = Self::new(rows, tile_size)?;
        this.spawn = spawn;

        if !this.has_solid_border() {
            anyhow::bail!("map border is not entirely solid");
        }

        log::debug!(
            "parsed {size}x{size} map, tile size {}",
            this.tile_size,
            size = this.size
        );

        Ok(this)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// `None` when (row, col) is outside the grid
    pub fn cell(&self, row: isize, col: isize) -> Option<bool> {
        if row < 0 || col < 0 || row as usize >= self.size || col as usize >= self.size {
            return None;
        }

        self.tiles.get(row as usize * self.size + col as usize).copied()
    }

    /// out-of-bounds tiles count as solid so a march always stops at the edge
    pub fn is_solid(&self, row: isize, col: isize) -> bool {
        self.cell(row, col).unwrap_or(true)
    }

    /// (row, col) of the tile holding a world point, truncating toward zero
    pub fn tile_of(&self, point: Vec2) -> (isize, isize) {
        (
            (point.y / self.tile_size) as isize,
            (point.x / self.tile_size) as isize,
        )
    }

    pub fn has_solid_border(&self) -> bool {
        let last = self.size as isize - 1;
        (0..=last).all(|i| {
            self.is_solid(0, i)
                && self.is_solid(last, i)
                && self.is_solid(i, 0)
                && self.is_solid(i, last)
        })
    }

    /// iterate over (row, col, solid)
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, solid)| (idx / self.size, idx % self.size, *solid))
    }

    /// centre of the `*` tile, if the map had one
    pub fn spawn(&self) -> Option<Vec2> {
        let (row, col) = self.spawn?;
        Some(Vec2::new(
            (col as f32 + 0.5) * self.tile_size,
            (row as f32 + 0.5) * self.tile_size,
        ))
    }
}

fn parse_meta<'lines>(
    mut lines: impl Iterator<Item = &'lines str>,
) -> anyhow::Result<Option<f32>> {
    let mut tile_size = None;

    for line in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }

        let mut chunks = line.trim().split(',');
        let directive = chunks.by_ref().next().unwrap_or_default();
        let params = chunks
            .map(|param| param.split_once('='))
            .collect::<Option<HashMap<_, _>>>()
            .context("incorrectly formatted meta")?;
        match directive {
            "tile" => {
                let size = params.get("size").context("tile meta needs a size")?;
                tile_size = Some(
                    size.parse::<f32>()
                        .with_context(|| format!("bad tile size: {size}"))?,
                );
            }
            other => anyhow::bail!("unrecognized meta directive: {other}"),
        }
    }

    Ok(tile_size)
}

type MainBlock = (Vec<Vec<bool>>, Option<(usize, usize)>);

fn parse_main<'lines>(
    mut lines: impl Iterator<Item = &'lines str>,
) -> anyhow::Result<MainBlock> {
    let mut rows = vec![];
    let mut spawn = None;

    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col, tile)| {
                Ok(match tile {
                    '#' | '1' => true,
                    ' ' | '.' | '0' => false,
                    '*' => {
                        spawn = Some((rows.len(), col));
                        false
                    }
                    other => anyhow::bail!("invalid tile in map: {other:?}"),
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        rows.push(row);
    }

    Ok((rows, spawn))
}

/// rows of an empty room enclosed by a one tile wall
#[cfg(test)]
pub(crate) fn open_room(size: usize) -> Vec<Vec<bool>> {
    (0..size)
        .map(|row| {
            (0..size)
                .map(|col| row == 0 || col == 0 || row == size - 1 || col == size - 1)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_parses() {
        let grid = GridModel::parse(DEFAULT_MAP).unwrap();
        assert_eq!(grid.size(), 8);
        assert_eq!(grid.tile_size(), 60.);
        assert!(grid.has_solid_border());
        assert!(grid.is_solid(1, 2));
        assert!(!grid.is_solid(4, 4));
        assert_eq!(grid.spawn(), None);
    }

    #[test]
    fn tile_of_truncates() {
        let grid = GridModel::new(open_room(8), 64.).unwrap();
        assert_eq!(grid.tile_of(Vec2::new(0., 0.)), (0, 0));
        assert_eq!(grid.tile_of(Vec2::new(63.99, 64.)), (1, 0));
        assert_eq!(grid.tile_of(Vec2::new(288., 200.)), (3, 4));
        // toward zero, like an integer cast
        assert_eq!(grid.tile_of(Vec2::new(-10., -70.)), (-1, 0));
    }

    #[test]
    fn out_of_bounds_is_solid() {
        let grid = GridModel::new(vec![vec![false; 3]; 3], 10.).unwrap();
        assert_eq!(grid.cell(1, 1), Some(false));
        assert_eq!(grid.cell(-1, 1), None);
        assert_eq!(grid.cell(1, 3), None);
        assert!(grid.is_solid(3, 0));
        assert!(!grid.has_solid_border());
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(GridModel::new(vec![], 64.).is_err());
        assert!(GridModel::new(vec![vec![true; 3]; 2], 64.).is_err());
        assert!(GridModel::new(open_room(4), 0.).is_err());
    }

    #[test]
    fn parse_reads_meta_and_spawn() {
        let src = "!!!!META\ntile,size=32\n\n!!!!MAIN\n####\n#*.#\n#  #\n####\n";
        let grid = GridModel::parse(src).unwrap();
        assert_eq!(grid.tile_size(), 32.);
        assert_eq!(grid.spawn(), Some(Vec2::new(48., 48.)));
        assert!(!grid.is_solid(1, 2));
    }

    #[test]
    fn parse_errors() {
        // open border
        assert!(GridModel::parse("!!!!MAIN\n####\n#  #\n#   \n####\n").is_err());
        // unknown tile
        assert!(GridModel::parse("!!!!MAIN\n###\n#x#\n###\n").is_err());
        // unknown directive
        assert!(GridModel::parse("!!!!FOO\n").is_err());
        assert!(GridModel::parse("!!!!META\nfog,dof=4\n\n!!!!MAIN\n###\n# #\n###\n").is_err());
        // no grid at all
        assert!(GridModel::parse("!!!!META\ntile,size=4\n").is_err());
    }
}
