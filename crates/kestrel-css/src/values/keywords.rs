//! CSS keyword identifiers.
//!
//! [§ 3.1 Pre-defined Keywords](https://www.w3.org/TR/css-values-4/#keywords)
//!
//! "In the value definition fields, keywords with a pre-defined meaning appear
//! literally. Keywords are CSS identifiers and are interpreted ASCII
//! case-insensitively."

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Every keyword any property grammar in this crate recognises.
///
/// Parsing is ASCII case-insensitive; serialization is the lowercase
/// canonical spelling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(into = "&'static str")]
#[allow(missing_docs)]
pub enum CSSValueID {
    // Generic
    Auto,
    None,
    Normal,
    All,
    Content,
    MinContent,
    MaxContent,
    FitContent,
    Stretch,
    Currentcolor,

    // Display
    Inline,
    Block,
    RunIn,
    Flow,
    FlowRoot,
    Table,
    Flex,
    Grid,
    Ruby,
    Math,
    ListItem,
    Contents,
    InlineBlock,
    InlineTable,
    InlineFlex,
    InlineGrid,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableRow,
    TableCell,
    TableColumnGroup,
    TableColumn,
    TableCaption,
    RubyBase,
    RubyText,
    RubyBaseContainer,
    RubyTextContainer,

    // Content
    OpenQuote,
    CloseQuote,
    NoOpenQuote,
    NoCloseQuote,

    // Box and positioning
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
    Left,
    Right,
    Top,
    Bottom,
    Center,
    InlineStart,
    InlineEnd,
    Both,
    Visible,
    Hidden,
    Collapse,
    Scroll,
    Clip,
    BorderBox,
    PaddingBox,
    ContentBox,
    Text,

    // Borders
    Dotted,
    Dashed,
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
    Thin,
    Medium,
    Thick,
    Wavy,
    Fill,
    Repeat,
    Round,
    Space,

    // Backgrounds
    NoRepeat,
    RepeatX,
    RepeatY,
    Local,
    Cover,
    Contain,

    // Gradients
    To,
    At,
    From,
    In,
    Circle,
    Ellipse,
    ClosestSide,
    ClosestCorner,
    FarthestSide,
    FarthestCorner,

    // Text
    Start,
    End,
    Justify,
    MatchParent,
    Capitalize,
    Uppercase,
    Lowercase,
    FullWidth,
    FullSizeKana,
    Hanging,
    EachLine,
    Underline,
    Overline,
    LineThrough,
    Blink,
    FromFont,
    Pre,
    PreWrap,
    PreLine,
    Nowrap,
    BreakSpaces,
    Preserve,
    PreserveBreaks,
    PreserveSpaces,
    Wrap,
    Balance,
    Pretty,
    Stable,

    // Flexbox and alignment
    Row,
    RowReverse,
    Column,
    ColumnReverse,
    WrapReverse,
    Baseline,
    First,
    Last,
    /// `last baseline`; only ever produced by the alignment parsers.
    #[strum(to_string = "last baseline")]
    LastBaseline,
    SelfStart,
    SelfEnd,
    FlexStart,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Safe,
    Unsafe,
    Legacy,
    AnchorCenter,

    // Grid
    Span,
    Dense,
    AutoFill,
    AutoFit,
    Subgrid,
    AutoFlow,
    Minmax,

    // Fonts
    Italic,
    Oblique,
    Bold,
    Bolder,
    Lighter,
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
    XxSmall,
    XSmall,
    Small,
    Large,
    XLarge,
    XxLarge,
    XxxLarge,
    Larger,
    Smaller,
    Serif,
    SansSerif,
    Cursive,
    Fantasy,
    Monospace,
    SystemUi,
    UiSerif,
    UiSansSerif,
    UiMonospace,
    UiRounded,
    Fangsong,
    Caption,
    Icon,
    Menu,
    MessageBox,
    SmallCaption,
    StatusBar,
    SmallCaps,
    AllSmallCaps,
    PetiteCaps,
    AllPetiteCaps,
    Unicase,
    TitlingCaps,
    CommonLigatures,
    NoCommonLigatures,
    DiscretionaryLigatures,
    NoDiscretionaryLigatures,
    HistoricalLigatures,
    NoHistoricalLigatures,
    Contextual,
    NoContextual,
    LiningNums,
    OldstyleNums,
    ProportionalNums,
    TabularNums,
    DiagonalFractions,
    StackedFractions,
    Ordinal,
    SlashedZero,
    #[strum(serialize = "jis78")]
    Jis78,
    #[strum(serialize = "jis83")]
    Jis83,
    #[strum(serialize = "jis90")]
    Jis90,
    #[strum(serialize = "jis04")]
    Jis04,
    Simplified,
    Traditional,
    ProportionalWidth,
    HistoricalForms,
    Stylistic,
    Styleset,
    CharacterVariant,
    Swash,
    Ornaments,
    Annotation,
    Sub,
    Super,
    Emoji,
    Unicode,
    On,
    Off,
    ExHeight,
    CapHeight,
    ChWidth,
    IcWidth,
    IcHeight,

    // Transitions and easing
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
    StepStart,
    StepEnd,
    JumpStart,
    JumpEnd,
    JumpNone,
    JumpBoth,
    AllowDiscrete,
}

impl CSSValueID {
    /// The canonical lowercase spelling.
    #[must_use]
    pub fn into_static(self) -> &'static str {
        self.into()
    }

    /// Looks up a keyword from an identifier, ASCII case-insensitively.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        ident.parse().ok().filter(|id| *id != Self::LastBaseline)
    }
}

/// [§ 7.3 Explicit Defaulting](https://www.w3.org/TR/css-cascade-5/#defaulting-keywords)
///
/// "All CSS properties accept the CSS-wide keyword values as the entire
/// property value."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum CSSWideKeyword {
    Initial,
    Inherit,
    Unset,
    Revert,
    RevertLayer,
}

impl CSSWideKeyword {
    /// Matches an identifier against the CSS-wide keywords.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        ident.parse().ok()
    }
}
