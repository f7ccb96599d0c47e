//! Board registry: the ordered board list with its cardinality and
//! locked-board policies.

use std::collections::HashSet;

use super::config::WorkspaceConfig;
use super::entities::{Board, WorkspaceState};
use super::packing::GridLayoutProvider;
use super::templates::{board_name, main_board, starter_board_contents};
use super::value_objects::BoardId;
use crate::domain::errors::{WorkspaceError, WorkspaceResult};

impl WorkspaceState {
    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| &board.id == id)
    }

    pub fn board_mut(&mut self, id: &BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|board| &board.id == id)
    }

    pub fn main_board(&self) -> Option<&Board> {
        self.boards.iter().find(|board| board.is_locked)
    }

    pub fn main_board_id(&self) -> BoardId {
        self.main_board().map(|board| board.id.clone()).unwrap_or_else(BoardId::main)
    }

    /// Active board, or the main board when the active id dangles
    pub fn active_board(&self) -> Option<&Board> {
        self.board(&self.active_board_id).or_else(|| self.main_board())
    }

    pub fn active_board_mut(&mut self) -> Option<&mut Board> {
        let id = match self.board(&self.active_board_id) {
            Some(board) => board.id.clone(),
            None => self.main_board_id(),
        };
        self.board_mut(&id)
    }

    /// Append a starter board and make it active
    pub fn add_board(&mut self, limit: usize, config: &WorkspaceConfig) -> WorkspaceResult<BoardId> {
        if self.boards.len() >= limit {
            return Err(WorkspaceError::BoardLimitExceeded { limit });
        }

        let id = BoardId::next(self.boards.iter().map(|board| &board.id));
        let (items, layouts) = starter_board_contents(config);
        let board = Board::new(id.clone(), board_name(self.boards.len() + 1), items, layouts, false);
        self.boards.push(board);
        self.active_board_id = id.clone();
        Ok(id)
    }

    /// Remove an unlocked board. Returns true when the removed board was
    /// active, in which case the main board takes over.
    pub fn remove_board(&mut self, id: &BoardId) -> WorkspaceResult<bool> {
        let index = self
            .boards
            .iter()
            .position(|board| &board.id == id)
            .ok_or_else(|| WorkspaceError::UnknownBoard(id.clone()))?;
        if self.boards[index].is_locked {
            return Err(WorkspaceError::CannotDeleteLockedBoard);
        }

        self.boards.remove(index);
        let was_active = &self.active_board_id == id;
        if was_active {
            self.active_board_id = self.main_board_id();
        }
        Ok(was_active)
    }

    /// Rename an unlocked board. Blank names are ignored (Ok(false)).
    pub fn rename_board(&mut self, id: &BoardId, name: &str) -> WorkspaceResult<bool> {
        let board = self.board_mut(id).ok_or_else(|| WorkspaceError::UnknownBoard(id.clone()))?;
        if board.is_locked {
            return Err(WorkspaceError::CannotRenameLockedBoard);
        }

        let name = name.trim();
        if name.is_empty() || board.name == name {
            return Ok(false);
        }
        board.name = name.to_string();
        board.touch();
        Ok(true)
    }

    /// Activate a board. Maximize flags never survive a switch.
    pub fn switch_board(&mut self, id: &BoardId) -> WorkspaceResult<()> {
        if self.board(id).is_none() {
            return Err(WorkspaceError::UnknownBoard(id.clone()));
        }
        self.active_board_id = id.clone();
        for board in &mut self.boards {
            board.clear_maximized();
        }
        Ok(())
    }

    /// Bring possibly hand-edited or stale state back to a valid shape:
    /// exactly one locked board, unique board ids, repaired layouts, a
    /// resolvable active id and no maximized widgets. Returns true when
    /// anything had to change.
    pub fn normalize(&mut self, config: &WorkspaceConfig, grid: &impl GridLayoutProvider) -> bool {
        let mut changed = false;

        let mut ids = HashSet::new();
        let before = self.boards.len();
        self.boards.retain(|board| ids.insert(board.id.clone()));
        changed |= self.boards.len() != before;

        let mut seen_locked = false;
        for board in &mut self.boards {
            if board.is_locked && seen_locked {
                board.is_locked = false;
                changed = true;
            }
            seen_locked |= board.is_locked;
        }
        if !seen_locked {
            let mut main = main_board(config);
            if ids.contains(&main.id) {
                main.id = BoardId::next(self.boards.iter().map(|board| &board.id));
            }
            self.boards.insert(0, main);
            changed = true;
        }

        for board in &mut self.boards {
            changed |= board.repair(config.widget_size, grid);
            if board.maximized().is_some() {
                board.clear_maximized();
                changed = true;
            }
        }

        if self.board(&self.active_board_id).is_none() {
            self.active_board_id = self.main_board_id();
            changed = true;
        }

        changed
    }

    /// Invariant check used by tests and debug assertions
    pub fn locked_board_count(&self) -> usize {
        self.boards.iter().filter(|board| board.is_locked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::packing::ResponsiveGrid;
    use crate::domain::workspace::templates::bootstrap_state;

    fn fresh() -> (WorkspaceState, WorkspaceConfig) {
        let config = WorkspaceConfig::default();
        (bootstrap_state(&config), config)
    }

    #[test]
    fn add_board_respects_limit_and_activates() {
        let (mut state, config) = fresh();
        let id = state.add_board(2, &config).unwrap();
        assert_eq!(id, BoardId::from("board-1"));
        assert_eq!(state.active_board_id, id);
        assert_eq!(state.boards[1].name, "Board 2");

        assert_eq!(state.add_board(2, &config), Err(WorkspaceError::BoardLimitExceeded { limit: 2 }));
        assert_eq!(state.boards.len(), 2);
    }

    #[test]
    fn locked_board_cannot_be_removed_or_renamed() {
        let (mut state, _) = fresh();
        let snapshot = state.clone();
        assert_eq!(state.remove_board(&BoardId::main()), Err(WorkspaceError::CannotDeleteLockedBoard));
        assert_eq!(state.rename_board(&BoardId::main(), "Mine"), Err(WorkspaceError::CannotRenameLockedBoard));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn removing_active_board_falls_back_to_main() {
        let (mut state, config) = fresh();
        let id = state.add_board(6, &config).unwrap();
        assert_eq!(state.remove_board(&id), Ok(true));
        assert_eq!(state.active_board_id, BoardId::main());
        assert_eq!(state.boards.len(), 1);
    }

    #[test]
    fn rename_ignores_blank_names() {
        let (mut state, config) = fresh();
        let id = state.add_board(6, &config).unwrap();
        assert_eq!(state.rename_board(&id, "   "), Ok(false));
        assert_eq!(state.rename_board(&id, "  Alts  "), Ok(true));
        assert_eq!(state.board(&id).unwrap().name, "Alts");
    }

    #[test]
    fn switch_to_unknown_board_changes_nothing() {
        let (mut state, _) = fresh();
        let ghost = BoardId::from("ghost");
        assert_eq!(state.switch_board(&ghost), Err(WorkspaceError::UnknownBoard(ghost)));
        assert_eq!(state.active_board_id, BoardId::main());
    }

    #[test]
    fn normalize_recreates_missing_main_board() {
        let (mut state, config) = fresh();
        let grid = ResponsiveGrid::new(config.clone());
        state.add_board(6, &config).unwrap();
        state.boards.remove(0);
        state.active_board_id = BoardId::from("gone");

        assert!(state.normalize(&config, &grid));
        assert_eq!(state.locked_board_count(), 1);
        assert!(state.boards[0].is_locked);
        assert_eq!(state.active_board_id, BoardId::main());
        assert!(!state.normalize(&config, &grid));
    }

    #[test]
    fn normalize_keeps_only_first_locked_board() {
        let (mut state, config) = fresh();
        let grid = ResponsiveGrid::new(config.clone());
        let id = state.add_board(6, &config).unwrap();
        state.board_mut(&id).unwrap().is_locked = true;

        assert!(state.normalize(&config, &grid));
        assert_eq!(state.locked_board_count(), 1);
        assert!(!state.board(&id).unwrap().is_locked);
    }
}
