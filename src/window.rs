//! Window representation - a viewport into the buffer
//!
//! The cursor itself lives in the buffer; the window only remembers which
//! lines are on screen and the goal column for vertical movement.

/// A window displaying a portion of a buffer
#[derive(Debug)]
pub struct Window {
    /// First visible line in the window
    top_line: usize,
    /// Number of text rows in window (excluding mode line)
    height: u16,
    /// Goal display column for vertical movement
    goal_col: Option<usize>,
}

impl Window {
    /// Create a new window with the given number of text rows
    pub fn new(height: u16) -> Self {
        Self {
            top_line: 0,
            height: height.max(1),
            goal_col: None,
        }
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Set the top visible line
    pub fn set_top_line(&mut self, line: usize) {
        self.top_line = line;
    }

    /// Get the goal column for vertical movement
    pub fn goal_col(&self) -> Option<usize> {
        self.goal_col
    }

    /// Set the goal column; None after any horizontal move
    pub fn set_goal_col(&mut self, col: Option<usize>) {
        self.goal_col = col;
    }

    /// Get window height in rows
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Set window height
    pub fn set_height(&mut self, height: u16) {
        self.height = height.max(1);
    }

    /// Check if a line is visible in the window
    pub fn is_line_visible(&self, line: usize) -> bool {
        line >= self.top_line && line < self.top_line + self.height as usize
    }

    /// Adjust top_line so that `line` is on screen
    pub fn ensure_visible(&mut self, line: usize) {
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.height as usize {
            self.top_line = line + 1 - self.height as usize;
        }
    }

    /// Rows to move for a page up/down, keeping two lines of context
    pub fn page_size(&self) -> usize {
        (self.height as usize).saturating_sub(2).max(1)
    }
}
