//! Payload type lists, their tagged unions and callback tables.
//!
//! A type list is a tuple of payload types such as `(u32,)` or
//! `(u32, String, Order)`. Each list has a [`TypeList::Union`] value type that
//! a queue can store, and a [`TypeList::Table`] holding one handler per
//! payload type in list order.
//!
//! A single-type list uses the payload type itself as its union, so no
//! wrapping happens. Lists of two to six types use the generated `OneOfN`
//! enums.
//!
//! Picking the variant for a value is resolved at compile time through
//! [`Inject`]: the second type parameter is a position marker inferred from
//! the value's type. If a type appears twice in the list the position is
//! ambiguous and the call does not compile.

use crate::core::Result;
use crate::pool::Handler;

/// Position marker for the 1st payload type
#[derive(Debug)]
pub enum Index0 {}
/// Position marker for the 2nd payload type
#[derive(Debug)]
pub enum Index1 {}
/// Position marker for the 3rd payload type
#[derive(Debug)]
pub enum Index2 {}
/// Position marker for the 4th payload type
#[derive(Debug)]
pub enum Index3 {}
/// Position marker for the 5th payload type
#[derive(Debug)]
pub enum Index4 {}
/// Position marker for the 6th payload type
#[derive(Debug)]
pub enum Index5 {}

/// A closed list of payload types.
pub trait TypeList: 'static {
    /// Value type stored in the queue
    type Union: Send + 'static;

    /// One handler per payload type, in list order
    type Table: Send + Sync + 'static;

    /// Number of payload types
    const LEN: usize;

    /// Route `item` to the handler registered for its variant.
    fn dispatch(table: &Self::Table, item: Self::Union) -> Result<()>;

    /// Position of `item`'s payload type in the list.
    fn tag(item: &Self::Union) -> usize;
}

/// Wrap a `V` into the union of a list containing `V` at position `I`.
pub trait Inject<V, I>: TypeList {
    /// Build the union value holding `value`.
    fn inject(value: V) -> Self::Union;
}

/// Conversion from a tuple of closures into a [`TypeList::Table`].
///
/// Implemented for tuples of `Fn(Ti) -> Result<()>` closures whose arity and
/// argument types match the list.
pub trait IntoCallbackTable<L: TypeList> {
    /// Box every closure into the list's table.
    fn into_table(self) -> L::Table;
}

impl<T0: Send + 'static> TypeList for (T0,) {
    type Union = T0;
    type Table = (Handler<T0>,);
    const LEN: usize = 1;

    fn dispatch(table: &Self::Table, item: T0) -> Result<()> {
        (table.0)(item)
    }

    fn tag(_item: &T0) -> usize {
        0
    }
}

impl<T0: Send + 'static> Inject<T0, Index0> for (T0,) {
    fn inject(value: T0) -> T0 {
        value
    }
}

impl<T0, F0> IntoCallbackTable<(T0,)> for (F0,)
where
    T0: Send + 'static,
    F0: Fn(T0) -> Result<()> + Send + Sync + 'static,
{
    fn into_table(self) -> (Handler<T0>,) {
        (Box::new(self.0),)
    }
}

macro_rules! type_list {
    (@inject $union:ident $all:tt; $( $variant:ident $ty:ident $index:ident ),+) => {
        $( type_list!(@inject_one $union $all $variant $ty $index); )+
    };
    (@inject_one $union:ident [$($all:ident),+] $variant:ident $ty:ident $index:ident) => {
        impl<$($all: Send + 'static),+> Inject<$ty, $index> for ($($all,)+) {
            fn inject(value: $ty) -> Self::Union {
                $union::$variant(value)
            }
        }
    };
    ($union:ident, $len:literal; $( $variant:ident ( $ty:ident, $f:ident, $index:ident, $slot:tt ) ),+) => {
        #[doc = concat!("A value holding exactly one of ", stringify!($len), " payload types.")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $union<$($ty),+> {
            $(
                #[doc = concat!("Payload at position ", stringify!($slot))]
                $variant($ty),
            )+
        }

        impl<$($ty),+> $union<$($ty),+> {
            /// Position of the held payload type in the list.
            pub fn tag(&self) -> usize {
                match self {
                    $( $union::$variant(_) => $slot, )+
                }
            }
        }

        impl<$($ty: Send + 'static),+> TypeList for ($($ty,)+) {
            type Union = $union<$($ty),+>;
            type Table = ($(Handler<$ty>,)+);
            const LEN: usize = $len;

            fn dispatch(table: &Self::Table, item: Self::Union) -> Result<()> {
                match item {
                    $( $union::$variant(value) => (table.$slot)(value), )+
                }
            }

            fn tag(item: &Self::Union) -> usize {
                item.tag()
            }
        }

        impl<$($ty,)+ $($f,)+> IntoCallbackTable<($($ty,)+)> for ($($f,)+)
        where
            $(
                $ty: Send + 'static,
                $f: Fn($ty) -> Result<()> + Send + Sync + 'static,
            )+
        {
            fn into_table(self) -> ($(Handler<$ty>,)+) {
                ($(Box::new(self.$slot) as Handler<$ty>,)+)
            }
        }

        type_list!(@inject $union [$($ty),+]; $( $variant $ty $index ),+);
    };
}

type_list!(OneOf2, 2;
    V0(T0, F0, Index0, 0),
    V1(T1, F1, Index1, 1));
type_list!(OneOf3, 3;
    V0(T0, F0, Index0, 0),
    V1(T1, F1, Index1, 1),
    V2(T2, F2, Index2, 2));
type_list!(OneOf4, 4;
    V0(T0, F0, Index0, 0),
    V1(T1, F1, Index1, 1),
    V2(T2, F2, Index2, 2),
    V3(T3, F3, Index3, 3));
type_list!(OneOf5, 5;
    V0(T0, F0, Index0, 0),
    V1(T1, F1, Index1, 1),
    V2(T2, F2, Index2, 2),
    V3(T3, F3, Index3, 3),
    V4(T4, F4, Index4, 4));
type_list!(OneOf6, 6;
    V0(T0, F0, Index0, 0),
    V1(T1, F1, Index1, 1),
    V2(T2, F2, Index2, 2),
    V3(T3, F3, Index3, 3),
    V4(T4, F4, Index4, 4),
    V5(T5, F5, Index5, 5));
