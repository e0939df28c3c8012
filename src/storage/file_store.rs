use crate::{
    domain::{Board, BoardId, OrderDelta},
    error::{Result, TableroError},
    storage::BoardStore,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based store: one JSON document per board.
///
/// A local-first collaborator with the same contract a remote API would
/// have. Patches load the owning board, apply the field change and write
/// the file back; concurrent patches are last-write-wins, matching the
/// consistency model the engine assumes.
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const TABLERO_DIR: &'static str = ".tablero";
    const BOARDS_DIR: &'static str = "boards";

    /// Creates a store rooted at the given project directory
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::TABLERO_DIR),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn board_file(&self, id: BoardId) -> PathBuf {
        self.boards_dir().join(format!("{id}.json"))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Creates the directory layout
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;
        Ok(())
    }

    /// Writes a board document, creating or replacing it
    pub async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.boards_dir()).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(board.id), json).await?;
        Ok(())
    }

    async fn load_board(&self, id: BoardId) -> Result<Board> {
        let file_path = self.board_file(id);

        if !file_path.exists() {
            return Err(TableroError::BoardNotFound(id));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let board: Board = serde_json::from_str(&contents)?;
        Ok(board)
    }

    async fn board_ids(&self) -> Result<Vec<BoardId>> {
        let boards_dir = self.boards_dir();

        if !boards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&boards_dir).await?;
        let mut ids = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if let Ok(uuid) = stem.parse::<uuid::Uuid>() {
                        ids.push(BoardId::from(uuid));
                    }
                }
            }
        }

        Ok(ids)
    }
}

#[async_trait]
impl BoardStore for FileStore {
    async fn fetch_board(&self, id: BoardId) -> Result<Board> {
        self.load_board(id).await
    }

    async fn update_order(&self, delta: &OrderDelta) -> Result<()> {
        // Patches name an entity, not a board, so walk the documents
        // until one owns it.
        for id in self.board_ids().await? {
            let mut board = self.load_board(id).await?;
            if delta.apply_to(&mut board) {
                return self.save_board(&board).await;
            }
        }

        Err(match delta {
            OrderDelta::Column { id, .. } => TableroError::ColumnNotFound(*id),
            OrderDelta::Task { id, .. } => TableroError::TaskNotFound(*id),
        })
    }
}
