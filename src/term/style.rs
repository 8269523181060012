//! Text attributes and scoped styling.
//!
//! An [`AttrSet`] is a plain bitmask over [`Attr`]. Every attribute knows
//! the SGR attribute that turns it on and the one that turns it off; a few
//! share an "off" code (bold and faint are both cleared by normal intensity).

use std::fmt;
use std::ops::{BitOr, BitOrAssign, Deref, DerefMut};
use std::str::FromStr;

use crossterm::style::Attribute;

use super::{Surface, TermError};

/// A single text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    Bold,
    Faint,
    Italic,
    Underline,
    BlinkSlow,
    BlinkFast,
    Reverse,
    Conceal,
    Strikethrough,
    Fraktur,
    DoubleUnderline,
    Framed,
    Encircled,
    Overlined,
}

impl Attr {
    pub const ALL: [Self; 14] = [
        Self::Bold,
        Self::Faint,
        Self::Italic,
        Self::Underline,
        Self::BlinkSlow,
        Self::BlinkFast,
        Self::Reverse,
        Self::Conceal,
        Self::Strikethrough,
        Self::Fraktur,
        Self::DoubleUnderline,
        Self::Framed,
        Self::Encircled,
        Self::Overlined,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Faint => "faint",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::BlinkSlow => "blink_slow",
            Self::BlinkFast => "blink_fast",
            Self::Reverse => "reverse",
            Self::Conceal => "conceal",
            Self::Strikethrough => "strikethrough",
            Self::Fraktur => "fraktur",
            Self::DoubleUnderline => "double_underline",
            Self::Framed => "framed",
            Self::Encircled => "encircled",
            Self::Overlined => "overlined",
        }
    }

    /// The SGR attribute that enables this one.
    pub const fn on(self) -> Attribute {
        match self {
            Self::Bold => Attribute::Bold,
            Self::Faint => Attribute::Dim,
            Self::Italic => Attribute::Italic,
            Self::Underline => Attribute::Underlined,
            Self::BlinkSlow => Attribute::SlowBlink,
            Self::BlinkFast => Attribute::RapidBlink,
            Self::Reverse => Attribute::Reverse,
            Self::Conceal => Attribute::Hidden,
            Self::Strikethrough => Attribute::CrossedOut,
            Self::Fraktur => Attribute::Fraktur,
            Self::DoubleUnderline => Attribute::DoubleUnderlined,
            Self::Framed => Attribute::Framed,
            Self::Encircled => Attribute::Encircled,
            Self::Overlined => Attribute::OverLined,
        }
    }

    /// The SGR attribute that disables this one.
    pub const fn off(self) -> Attribute {
        match self {
            Self::Bold | Self::Faint => Attribute::NormalIntensity,
            Self::Italic | Self::Fraktur => Attribute::NoItalic,
            Self::Underline | Self::DoubleUnderline => Attribute::NoUnderline,
            Self::BlinkSlow | Self::BlinkFast => Attribute::NoBlink,
            Self::Reverse => Attribute::NoReverse,
            Self::Conceal => Attribute::NoHidden,
            Self::Strikethrough => Attribute::NotCrossedOut,
            Self::Framed | Self::Encircled => Attribute::NotFramedOrEncircled,
            Self::Overlined => Attribute::NotOverLined,
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attr {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "dim" {
            return Ok(Self::Faint);
        }
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| TermError::UnknownAttribute(s.to_string()))
    }
}

/// A set of attributes stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttrSet(u16);

impl AttrSet {
    pub const EMPTY: Self = Self(0);

    /// Parse a list of attribute names, failing on the first unknown one.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::UnknownAttribute`] for an unrecognised name.
    pub fn parse_names(names: &[&str]) -> Result<Self, TermError> {
        names
            .iter()
            .try_fold(Self::EMPTY, |set, name| Ok(set | name.parse::<Attr>()?))
    }

    pub const fn contains(self, attr: Attr) -> bool {
        self.0 & attr.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn insert(&mut self, attr: Attr) {
        self.0 |= attr.bit();
    }

    pub const fn remove(&mut self, attr: Attr) {
        self.0 &= !attr.bit();
    }

    /// Clear everything that `attrs` would switch off, including attributes
    /// that share an off code with a member (unsetting faint also drops bold).
    pub fn clear_with_off_codes_of(&mut self, attrs: Self) {
        for attr in Attr::ALL {
            if self.contains(attr) && attrs.iter().any(|off| off.off() == attr.off()) {
                self.remove(attr);
            }
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Attr> {
        Attr::ALL.into_iter().filter(move |attr| self.contains(*attr))
    }
}

impl From<Attr> for AttrSet {
    fn from(attr: Attr) -> Self {
        Self(attr.bit())
    }
}

impl BitOr<Attr> for AttrSet {
    type Output = Self;

    fn bitor(self, rhs: Attr) -> Self {
        Self(self.0 | rhs.bit())
    }
}

impl BitOr for AttrSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr for Attr {
    type Output = AttrSet;

    fn bitor(self, rhs: Self) -> AttrSet {
        AttrSet(self.bit() | rhs.bit())
    }
}

impl BitOrAssign<Attr> for AttrSet {
    fn bitor_assign(&mut self, rhs: Attr) {
        self.insert(rhs);
    }
}

/// Keeps a set of attributes applied while alive.
///
/// Dereferences to the underlying surface so styled writes go through the
/// guard. Dropping it switches the attributes back off, on every exit path.
pub struct StyleGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    attrs: AttrSet,
}

impl<S: Surface + ?Sized> Deref for StyleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for StyleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for StyleGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(err) = self.surface.unset_attrs(self.attrs) {
            tracing::warn!(%err, "failed to restore text attributes");
        }
    }
}

/// Apply `attrs` and return a guard that reverts them when dropped.
///
/// # Errors
///
/// Returns an error if the attributes cannot be written.
pub fn styled<S: Surface + ?Sized>(
    surface: &mut S,
    attrs: impl Into<AttrSet>,
) -> Result<StyleGuard<'_, S>, TermError> {
    let attrs = attrs.into();
    surface.set_attrs(attrs)?;
    Ok(StyleGuard { surface, attrs })
}

/// Run `f` with `attrs` applied, reverting them afterwards even if `f` fails.
///
/// # Errors
///
/// Returns the error from applying the attributes or from `f`.
pub fn with_attrs<S: Surface + ?Sized, T>(
    surface: &mut S,
    attrs: impl Into<AttrSet>,
    f: impl FnOnce(&mut S) -> Result<T, TermError>,
) -> Result<T, TermError> {
    let mut guard = styled(surface, attrs)?;
    f(&mut guard)
}
