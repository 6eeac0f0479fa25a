use core::marker::PhantomData;
use std::collections::hash_map;
use std::collections::HashMap;

/// Typed Id over a [Collection]
///
/// An `Id` can only be obtained from a [Collection], so it always names an object of the feed.
/// It does not own the object, the [crate::Feed] does.
#[derive(Derivative)]
#[derivative(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Id<T> {
    id: String,
    #[derivative(Debug = "ignore")]
    #[derivative(Clone(bound = ""))]
    #[derivative(Eq(bound = ""))]
    #[derivative(PartialEq(bound = ""))]
    #[derivative(Ord(bound = ""))]
    #[derivative(PartialOrd(bound = ""))]
    #[derivative(Hash(bound = ""))]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    fn must_exists(s: String) -> Id<T> {
        Id {
            id: s,
            _phantom: PhantomData,
        }
    }

    /// get as str
    pub fn as_str(&self) -> &str {
        self
    }
}

impl<T> std::ops::Deref for Id<T> {
    type Target = str;
    fn deref(&self) -> &str {
        &self.id
    }
}

impl<T> serde::Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.id)
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Collection with typed Ids
#[derive(Debug)]
pub struct Collection<T>(HashMap<Id<T>, T>);

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection(HashMap::default())
    }
}

impl<T> Collection<T> {
    /// Typed id of the object named `raw_id`, if it exists
    pub fn get_id(&self, raw_id: &str) -> Option<Id<T>> {
        self.get_by_str(raw_id).map(|(id, _)| id)
    }

    pub fn get_by_str(&self, raw_id: &str) -> Option<(Id<T>, &T)> {
        let id = Id::must_exists(raw_id.to_owned());
        self.0.get(&id).map(|v| (id, v))
    }

    pub(crate) fn get_mut_by_str(&mut self, raw_id: &str) -> Option<(Id<T>, &mut T)> {
        let id = Id::must_exists(raw_id.to_owned());
        self.0.get_mut(&id).map(|v| (id, v))
    }

    pub(crate) fn get_mut(&mut self, id: &Id<T>) -> Option<&mut T> {
        self.0.get_mut(id)
    }

    pub(crate) fn values_mut(&mut self) -> hash_map::ValuesMut<'_, Id<T>, T> {
        self.0.values_mut()
    }

    /// Inserts `o` under `raw_id`, replacing any previous object with the same id
    pub(crate) fn insert(&mut self, raw_id: String, o: T) -> (Id<T>, Option<T>) {
        let id = Id::must_exists(raw_id);
        let previous = self.0.insert(id.clone(), o);
        (id, previous)
    }

    pub fn get(&self, id: &Id<T>) -> Option<&T> {
        self.0.get(id)
    }

    pub fn contains(&self, raw_id: &str) -> bool {
        self.get_by_str(raw_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the objects, in no particular order
    pub fn iter(&self) -> hash_map::Iter<'_, Id<T>, T> {
        self.0.iter()
    }

    pub fn values(&self) -> hash_map::Values<'_, Id<T>, T> {
        self.0.values()
    }
}

impl<T> std::ops::Index<&Id<T>> for Collection<T> {
    type Output = T;
    fn index(&self, id: &Id<T>) -> &T {
        &self.0[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_only_come_from_the_collection() {
        let mut c: Collection<u8> = Collection::default();
        let (id, previous) = c.insert("a".to_owned(), 1);
        assert!(previous.is_none());
        assert_eq!("a", id.as_str());
        assert_eq!(Some(id.clone()), c.get_id("a"));
        assert_eq!(None, c.get_id("b"));
        assert_eq!(1, c[&id]);

        let (_, previous) = c.insert("a".to_owned(), 2);
        assert_eq!(Some(1), previous);
        assert_eq!(1, c.len());
        assert_eq!(Some(&2), c.get(&id));
    }
}
