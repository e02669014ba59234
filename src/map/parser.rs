//! Map parsing functionality for converting raw board layouts into structured data.

use crate::error::ParseError;
use crate::map::tile::TileIndex;

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty tile.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    PowerPellet,
    /// A tunnel tile; stepping off the board from here wraps to the other side.
    Tunnel,
    /// A ghost house door tile.
    Door,
    /// The inside of the ghost house.
    House,
}

impl MapTile {
    /// Whether anything can ever stand on this tile.
    pub fn is_walkable(self) -> bool {
        !matches!(self, MapTile::Wall)
    }
}

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedMap {
    /// The parsed tile layout, indexed by row then column.
    pub tiles: Vec<Vec<MapTile>>,
    /// The positions of the house door tiles.
    pub house_door: [Option<TileIndex>; 2],
    /// The player's starting position.
    pub player_start: Option<TileIndex>,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::PowerPellet),
            ' ' => Ok(MapTile::Empty),
            'T' => Ok(MapTile::Tunnel),
            'X' => Ok(MapTile::Empty), // The player's starting position, treated as empty
            '=' => Ok(MapTile::Door),
            'H' => Ok(MapTile::House),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board contains unknown characters, if its rows differ in
    /// length, or if the house door is not defined by exactly two '=' characters.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().map(|line| line.chars().count()).unwrap_or(0);
        let mut tiles = Vec::with_capacity(raw_board.len());
        let mut house_door = [None; 2];
        let mut door_count = 0;
        let mut player_start = None;

        for (row, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row,
                    found,
                    expected: width,
                });
            }

            let mut parsed_row = Vec::with_capacity(width);
            for (col, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let position = TileIndex::new(row as i32, col as i32);

                if tile == MapTile::Door {
                    if door_count < 2 {
                        house_door[door_count] = Some(position);
                    }
                    door_count += 1;
                }

                if character == 'X' {
                    player_start = Some(position);
                }

                parsed_row.push(tile);
            }
            tiles.push(parsed_row);
        }

        if door_count != 2 {
            return Err(ParseError::InvalidHouseDoorCount(door_count));
        }

        Ok(ParsedMap {
            tiles,
            house_door,
            player_start,
        })
    }
}
