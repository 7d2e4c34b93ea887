//=========================================================================
// Multiplayer Configuration
//=========================================================================
//
// Screen geometry and indicator settings shared by every scene state.
//
//=========================================================================

//=== MultiplayerConfig ===================================================

/// Configuration for the multiplayer layer.
///
/// Built with a fluent API; every setter validates its argument.
///
/// # Default Values
///
/// - **Screen**: 160 x 120 pixels
/// - **Top margin**: 18 pixels (status bar band)
/// - **Indicator gap**: 2 pixels
/// - **Indicator layer**: 99
///
/// # Examples
///
/// ```
/// use aetheric_multiplayer::core::MultiplayerConfig;
///
/// let config = MultiplayerConfig::new()
///     .with_screen_size(320, 240)
///     .with_top_margin(24);
///
/// assert_eq!(config.screen_width(), 320);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplayerConfig {
    screen_width: i32,
    screen_height: i32,
    top_margin: i32,
    indicator_gap: i32,
    indicator_layer: i32,
}

impl MultiplayerConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self {
            screen_width: 160,
            screen_height: 120,
            top_margin: 18,
            indicator_gap: 2,
            indicator_layer: 99,
        }
    }

    /// Sets the screen size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_screen_size(mut self, width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Screen size must be positive, got {}x{}",
            width,
            height
        );
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Sets the height of the reserved band at the top of the screen.
    ///
    /// Sprites whose top edge is inside the band count as off-screen
    /// above.
    ///
    /// # Panics
    ///
    /// Panics if `margin` is negative.
    pub fn with_top_margin(mut self, margin: i32) -> Self {
        assert!(margin >= 0, "Top margin must not be negative, got {}", margin);
        self.top_margin = margin;
        self
    }

    /// Sets the gap between a sprite's bound and its indicator.
    ///
    /// # Panics
    ///
    /// Panics if `gap` is negative.
    pub fn with_indicator_gap(mut self, gap: i32) -> Self {
        assert!(gap >= 0, "Indicator gap must not be negative, got {}", gap);
        self.indicator_gap = gap;
        self
    }

    /// Sets the draw-order layer of the indicator renderable.
    pub fn with_indicator_layer(mut self, layer: i32) -> Self {
        self.indicator_layer = layer;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn screen_width(&self) -> i32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> i32 {
        self.screen_height
    }

    pub fn top_margin(&self) -> i32 {
        self.top_margin
    }

    pub fn indicator_gap(&self) -> i32 {
        self.indicator_gap
    }

    pub fn indicator_layer(&self) -> i32 {
        self.indicator_layer
    }
}

impl Default for MultiplayerConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
