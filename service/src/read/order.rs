//! [`Order`] read model definition.

pub mod list {
    //! [`Order`]s list definitions.

    use common::define_pagination;

    use crate::domain::order;
    #[cfg(doc)]
    use crate::domain::Order;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = order::Id;

    /// Cursor pointing to a specific [`Order`] in a list.
    pub type Cursor = order::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`order::Status`] to narrow the list down to.
        pub status: Option<order::Status>,
    }
}
