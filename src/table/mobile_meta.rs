use std::fmt;
use std::rc::Rc;

use crate::table::column::CellValue;

pub const DEFAULT_MOBILE_PRIORITY: u32 = 99;

/// Custom display for a card field, given the accessor value and the row.
pub struct Formatter<T>(Rc<dyn Fn(&CellValue, &T) -> String>);

impl<T> Formatter<T> {
    pub fn new(f: impl Fn(&CellValue, &T) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn format(&self, value: &CellValue, row: &T) -> String {
        (self.0)(value, row)
    }
}

impl<T> Clone for Formatter<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for Formatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}

/// Per-column hints for the card layout, every field optional.
pub struct MobileMetaHints<T> {
    pub is_title: Option<bool>,
    pub is_subtitle: Option<bool>,
    pub priority: Option<u32>,
    pub mobile_hidden: Option<bool>,
    pub formatter: Option<Formatter<T>>,
}

impl<T> Default for MobileMetaHints<T> {
    fn default() -> Self {
        Self {
            is_title: None,
            is_subtitle: None,
            priority: None,
            mobile_hidden: None,
            formatter: None,
        }
    }
}

impl<T> Clone for MobileMetaHints<T> {
    fn clone(&self) -> Self {
        Self {
            is_title: self.is_title,
            is_subtitle: self.is_subtitle,
            priority: self.priority,
            mobile_hidden: self.mobile_hidden,
            formatter: self.formatter.clone(),
        }
    }
}

pub struct MobileMeta<T> {
    pub is_title: bool,
    pub is_subtitle: bool,
    pub priority: u32,
    pub mobile_hidden: bool,
    pub formatter: Option<Formatter<T>>,
}

impl<T> Clone for MobileMeta<T> {
    fn clone(&self) -> Self {
        Self {
            is_title: self.is_title,
            is_subtitle: self.is_subtitle,
            priority: self.priority,
            mobile_hidden: self.mobile_hidden,
            formatter: self.formatter.clone(),
        }
    }
}

impl<T> fmt::Debug for MobileMeta<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MobileMeta")
            .field("is_title", &self.is_title)
            .field("is_subtitle", &self.is_subtitle)
            .field("priority", &self.priority)
            .field("mobile_hidden", &self.mobile_hidden)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

pub fn normalize<T>(hints: &MobileMetaHints<T>) -> MobileMeta<T> {
    MobileMeta {
        is_title: hints.is_title.unwrap_or(false),
        is_subtitle: hints.is_subtitle.unwrap_or(false),
        priority: hints.priority.unwrap_or(DEFAULT_MOBILE_PRIORITY),
        mobile_hidden: hints.mobile_hidden.unwrap_or(false),
        formatter: hints.formatter.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hints_fill_defaults() {
        let meta = normalize::<()>(&MobileMetaHints::default());

        assert!(!meta.is_title);
        assert!(!meta.is_subtitle);
        assert!(!meta.mobile_hidden);
        assert_eq!(meta.priority, DEFAULT_MOBILE_PRIORITY);
        assert!(meta.formatter.is_none());
    }

    #[test]
    fn explicit_hints_and_formatter_are_kept() {
        let hints = MobileMetaHints::<i64> {
            is_subtitle: Some(true),
            priority: Some(2),
            formatter: Some(Formatter::new(|_value, row: &i64| format!("#{row}"))),
            ..MobileMetaHints::default()
        };

        let meta = normalize(&hints);

        assert!(meta.is_subtitle);
        assert!(!meta.is_title);
        assert_eq!(meta.priority, 2);
        let formatter = meta.formatter.expect("formatter should survive normalization");
        assert_eq!(formatter.format(&CellValue::Empty, &7), "#7");
    }
}
