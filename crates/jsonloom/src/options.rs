use alloc::string::String;

/// Controls whether strings still being received are visible in the tree.
///
/// A string that spans several chunks only gains its closing quote in the
/// last of them. This option decides what [`Parser::value`] shows for such a
/// string at the chunk boundaries in between.
///
/// [`Parser::value`]: crate::Parser::value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IncompleteStrings {
    /// Strings stay invisible until fully received.
    ///
    /// This is the only mode under which chunking is fully transparent: any
    /// partition of the input yields identical intermediate trees.
    #[default]
    Off,
    /// The latest partial contents replace the destination slot at each
    /// chunk boundary and at close.
    Plain,
    /// Like [`Plain`], with the given suffix appended to the partial
    /// contents — typically `"..."` to mark the value as still streaming.
    ///
    /// [`Plain`]: IncompleteStrings::Plain
    WithSuffix(String),
}

/// Configuration for [`Parser`].
///
/// # Examples
///
/// ```rust
/// use jsonloom::{IncompleteStrings, Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions {
///     incomplete_strings: IncompleteStrings::WithSuffix("...".into()),
///     ..Default::default()
/// });
/// ```
///
/// [`Parser`]: crate::Parser
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    /// How mid-parse strings surface in the tree.
    ///
    /// # Default
    ///
    /// `IncompleteStrings::Off`
    pub incomplete_strings: IncompleteStrings,

    /// Record a [`ParseEvent`] for every structural mutation, retrievable
    /// through [`Parser::take_events`].
    ///
    /// # Default
    ///
    /// `false`
    ///
    /// [`ParseEvent`]: crate::ParseEvent
    /// [`Parser::take_events`]: crate::Parser::take_events
    pub track_events: bool,
}
