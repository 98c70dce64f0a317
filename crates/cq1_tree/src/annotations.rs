// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The annotation store attached to every tree node, and the one annotation
// kind defined by this stack itself: source locations.

use std::any::{Any, TypeId};
use std::fmt;

use hashbrown::HashMap;

/// A value that can live in an [`Annotations`] store.
///
/// Blanket-implemented for every `'static` type that is `Clone`, so host
/// code never implements this by hand.
pub trait AnnotationValue: Any {
    fn clone_box(&self) -> Box<dyn AnnotationValue>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Clone> AnnotationValue for T {
    fn clone_box(&self) -> Box<dyn AnnotationValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Type-keyed heterogeneous map of node metadata.
///
/// A node holds at most one annotation per Rust type. Annotations are owned
/// by the node, cloned element-wise with it, and invisible to both
/// structural equality and completeness.
#[derive(Default)]
pub struct Annotations {
    entries: HashMap<TypeId, Box<dyn AnnotationValue>>,
}

impl Annotations {
    pub fn new() -> Annotations {
        Annotations {
            entries: HashMap::new(),
        }
    }

    /// Stores `value`, replacing any previous annotation of the same type.
    pub fn set<T: Any + Clone>(&mut self, value: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn has<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|value| AnnotationValue::as_any(&**value).downcast_ref::<T>())
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| AnnotationValue::as_any_mut(&mut **value).downcast_mut::<T>())
    }

    pub fn remove<T: Any>(&mut self) {
        self.entries.remove(&TypeId::of::<T>());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Clone for Annotations {
    fn clone(&self) -> Annotations {
        Annotations {
            entries: self
                .entries
                .iter()
                .map(|(key, value)| (*key, AnnotationValue::clone_box(&**value)))
                .collect(),
        }
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotations")
            .field("len", &self.entries.len())
            .finish()
    }
}

// Annotations never participate in structural equality, so two stores
// always compare equal. This lets node structs derive `PartialEq` while
// comparing children only.
impl PartialEq for Annotations {
    fn eq(&self, _other: &Annotations) -> bool {
        true
    }
}

/// Trait for nodes that carry an [`Annotations`] store.
///
/// The store is exposed as `meta` to keep it apart from the `annotations`
/// child that statement nodes have in the input language.
pub trait Annotated {
    fn meta(&self) -> &Annotations;
    fn meta_mut(&mut self) -> &mut Annotations;

    fn source_location(&self) -> Option<&SourceLocation> {
        self.meta().get()
    }

    fn set_source_location(&mut self, location: SourceLocation) {
        self.meta_mut().set(location);
    }

    /// Copies the source location of `other`, if it has one.
    fn copy_location_from<T: Annotated + ?Sized>(&mut self, other: &T) {
        if let Some(location) = other.source_location() {
            self.set_source_location(location.clone());
        }
    }

    fn with_location(mut self, location: SourceLocation) -> Self
    where
        Self: Sized,
    {
        self.set_source_location(location);
        self
    }
}

/// Range of source text a node was built from. Lines and columns are
/// 1-based; 0 means unknown.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file_name: String,
    pub first_line: u32,
    pub first_column: u32,
    pub last_line: u32,
    pub last_column: u32,
}

impl SourceLocation {
    pub fn new<T: Into<String>>(
        file_name: T,
        first_line: u32,
        first_column: u32,
        last_line: u32,
        last_column: u32,
    ) -> SourceLocation {
        SourceLocation {
            file_name: file_name.into(),
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }

    /// Grows the range to contain the given line/column position.
    pub fn expand_to_include(&mut self, line: u32, column: u32) {
        if line > self.last_line || (line == self.last_line && column > self.last_column) {
            self.last_line = line;
            self.last_column = column;
        }
        if line < self.first_line || (line == self.first_line && column < self.first_column) {
            self.first_line = line;
            self.first_column = column;
        }
    }
}

impl fmt::Display for SourceLocation {
    /// Renders as `filename:line[:col][..line[:col]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file_name.is_empty() {
            write!(f, "<unknown>")?;
        } else {
            write!(f, "{}", self.file_name)?;
        }
        if self.first_line > 0 {
            write!(f, ":{}", self.first_line)?;
            if self.first_column > 0 {
                write!(f, ":{}", self.first_column)?;
            }
            let range = self.last_line > self.first_line
                || (self.last_line == self.first_line && self.last_column > self.first_column);
            if range {
                write!(f, "..{}", self.last_line)?;
                if self.last_column > 0 {
                    write!(f, ":{}", self.last_column)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Weight(f64);

    #[derive(Clone, Debug, PartialEq)]
    struct Label(String);

    #[test]
    fn test_set_get_replace() {
        let mut annotations = Annotations::new();
        assert!(!annotations.has::<Weight>());
        annotations.set(Weight(1.5));
        annotations.set(Label("rx".to_string()));
        assert_eq!(annotations.get::<Weight>(), Some(&Weight(1.5)));
        annotations.set(Weight(2.0));
        assert_eq!(annotations.get::<Weight>(), Some(&Weight(2.0)));
        assert_eq!(annotations.len(), 2);
    }

    #[test]
    fn test_clone_is_element_wise() {
        let mut annotations = Annotations::new();
        annotations.set(Label("x".to_string()));
        let mut copy = annotations.clone();
        copy.get_mut::<Label>().unwrap().0 = "y".to_string();
        assert_eq!(annotations.get::<Label>().unwrap().0, "x");
        assert_eq!(copy.get::<Label>().unwrap().0, "y");
    }

    #[test]
    fn test_equality_is_vacuous() {
        let mut a = Annotations::new();
        a.set(Weight(1.0));
        let b = Annotations::new();
        assert_eq!(a, b);
    }

    #[test]
    fn test_location_display() {
        let location = SourceLocation::new("test.cq", 3, 5, 3, 9);
        assert_eq!(location.to_string(), "test.cq:3:5..3:9");
        let location = SourceLocation::new("test.cq", 3, 5, 4, 2);
        assert_eq!(location.to_string(), "test.cq:3:5..4:2");
        let location = SourceLocation::new("test.cq", 3, 5, 3, 5);
        assert_eq!(location.to_string(), "test.cq:3:5");
        let location = SourceLocation::new("", 0, 0, 0, 0);
        assert_eq!(location.to_string(), "<unknown>");
    }

    #[test]
    fn test_expand_to_include() {
        let mut location = SourceLocation::new("f", 2, 4, 2, 8);
        location.expand_to_include(3, 1);
        assert_eq!((location.last_line, location.last_column), (3, 1));
        location.expand_to_include(1, 9);
        assert_eq!((location.first_line, location.first_column), (1, 9));
    }
}
