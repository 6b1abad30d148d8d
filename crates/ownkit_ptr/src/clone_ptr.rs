use alloc::boxed::Box;
use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};

use crate::Upcast;
use crate::cloner::{Cloner, cloner_of};

// -----------------------------------------------------------------------------
// Held

/// A live pointee together with the capability of its concrete type.
struct Held<T: ?Sized + 'static> {
    ptr: NonNull<T>,
    cloner: &'static dyn Cloner<T>,
}

impl<T: ?Sized + 'static> Held<T> {
    #[inline]
    fn adopt<D>(value: Box<D>) -> Self
    where
        D: Clone + Upcast<T> + 'static,
    {
        let cloner = cloner_of::<D, T>();
        log::trace!("adopted `{}` behind `{}`", cloner.type_name(), type_name::<T>());
        Held {
            ptr: NonNull::from(Box::leak(<D as Upcast<T>>::upcast(value))),
            cloner,
        }
    }

    #[inline]
    fn duplicate(&self) -> Self {
        Held {
            // SAFETY: `cloner` was bound to the concrete type of `ptr` on adoption.
            ptr: unsafe { self.cloner.duplicate(self.ptr) },
            cloner: self.cloner,
        }
    }

    #[inline]
    fn destroy(self) {
        // SAFETY: `ptr` was adopted together with `cloner`, and `self` is consumed.
        unsafe { self.cloner.destroy(self.ptr) }
    }
}

// -----------------------------------------------------------------------------
// OwningClonePtr

/// An owning, nullable pointer with deep-copy semantics.
///
/// The pointee is a `T` or any concrete type `D: Upcast<T>`. When an object is
/// adopted, a capability bound to `D` is recorded; cloning allocates a new `D`
/// and dropping frees the `D`, even if only `T` is visible here.
///
/// # Ownership
///
/// - Two instances never share a pointee. [`Clone`] always deep-copies.
/// - Adopting ([`from_box`](Self::from_box), [`reset_to`](Self::reset_to))
///   takes the allocation as is. Borrowing constructors
///   ([`from_ref`](Self::from_ref), [`assign_ref`](Self::assign_ref)) clone.
/// - Every assignment drops the current pointee before taking the new one.
///
/// # Equality
///
/// `==` compares identity, not values. A clone is never equal to its source.
/// Zero-sized pointees all share one dangling address, so two pointers holding
/// one are equal only if they are the same instance.
///
/// # Null
///
/// Dereferencing a null pointer through [`Deref`] panics. Use [`get`](Self::get)
/// to check, or [`get_unchecked`](Self::get_unchecked) to skip the check.
///
/// # Examples
///
/// ```
/// use ownkit_ptr::OwningClonePtr;
///
/// let a = OwningClonePtr::new(vec![1, 2, 3]);
/// let mut b = a.clone();
/// b.push(4);
///
/// assert_eq!(*a, [1, 2, 3]);
/// assert_eq!(*b, [1, 2, 3, 4]);
/// assert!(a != b);
/// ```
pub struct OwningClonePtr<T: ?Sized + 'static> {
    held: Option<Held<T>>,
    _marker: PhantomData<T>,
}

impl<T: ?Sized + 'static> Drop for OwningClonePtr<T> {
    #[inline]
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized + 'static> Default for OwningClonePtr<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized + 'static> Clone for OwningClonePtr<T> {
    fn clone(&self) -> Self {
        Self {
            held: self.held.as_ref().map(Held::duplicate),
            _marker: PhantomData,
        }
    }

    /// Drops the current pointee, then deep-copies the one of `source`.
    ///
    /// If the clone panics, `self` is left null.
    fn clone_from(&mut self, source: &Self) {
        self.reset();
        self.held = source.held.as_ref().map(Held::duplicate);
    }
}

impl<T: Clone + 'static> From<Box<T>> for OwningClonePtr<T> {
    #[inline]
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

impl<T: ?Sized + 'static> OwningClonePtr<T> {
    /// Creates a null pointer.
    #[inline]
    pub const fn null() -> Self {
        Self {
            held: None,
            _marker: PhantomData,
        }
    }

    /// Moves `value` to the heap and owns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ownkit_ptr::OwningClonePtr;
    ///
    /// let p = OwningClonePtr::new(3);
    /// assert_eq!(*p, 3);
    /// ```
    #[inline]
    pub fn new(value: T) -> Self
    where
        T: Clone + Sized,
    {
        Self::from_value(value)
    }

    /// Moves a value of concrete type `D` to the heap and holds it as a `T`.
    #[inline]
    pub fn from_value<D>(value: D) -> Self
    where
        D: Clone + Upcast<T> + 'static,
    {
        Self::from_box(Box::new(value))
    }

    /// Adopts `value` without cloning it.
    ///
    /// The capability recorded is the one of `D`, whatever `T` is.
    #[inline]
    pub fn from_box<D>(value: Box<D>) -> Self
    where
        D: Clone + Upcast<T> + 'static,
    {
        Self {
            held: Some(Held::adopt(value)),
            _marker: PhantomData,
        }
    }

    /// Adopts a raw pointer without cloning it. A null `ptr` gives a null pointer.
    ///
    /// # Safety
    /// - `ptr` must be null or come from [`Box::<D>::into_raw`].
    /// - Ownership of the pointee moves to the result; `ptr` must not be freed elsewhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use ownkit_ptr::OwningClonePtr;
    ///
    /// let raw = Box::into_raw(Box::new(5u32));
    /// let p = unsafe { OwningClonePtr::<u32>::from_raw(raw) };
    /// assert!(p == raw);
    ///
    /// let n = unsafe { OwningClonePtr::<u32>::from_raw(core::ptr::null_mut::<u32>()) };
    /// assert!(n.is_null());
    /// ```
    #[inline]
    pub unsafe fn from_raw<D>(ptr: *mut D) -> Self
    where
        D: Clone + Upcast<T> + 'static,
    {
        match NonNull::new(ptr) {
            // SAFETY: the caller guarantees `ptr` came from `Box::<D>::into_raw`.
            Some(ptr) => Self::from_box(unsafe { Box::from_raw(ptr.as_ptr()) }),
            None => Self::null(),
        }
    }

    /// Clones `value` into a new allocation. The borrowed value is never adopted.
    #[inline]
    pub fn from_ref<D>(value: &D) -> Self
    where
        D: Clone + Upcast<T> + 'static,
    {
        Self::from_value(value.clone())
    }

    /// Clones the value behind `ptr` into a new allocation. A null `ptr` gives
    /// a null pointer.
    ///
    /// # Safety
    /// - `ptr` must be null or [convertible to a reference](core::ptr#pointer-to-reference-conversion).
    #[inline]
    pub unsafe fn from_const_ptr<D>(ptr: *const D) -> Self
    where
        D: Clone + Upcast<T> + 'static,
    {
        // SAFETY: see function docs.
        match unsafe { ptr.as_ref() } {
            Some(value) => Self::from_ref(value),
            None => Self::null(),
        }
    }

    /// Deep-copies the pointee of `src`, which holds a sized `U: Upcast<T>`.
    ///
    /// The copy is made through the capability of `src`, and the result holds
    /// it as a `T` with the capability of `U`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ownkit_ptr::{OwningClonePtr, impl_upcast};
    /// use core::fmt::Debug;
    ///
    /// trait Value: Debug {}
    /// impl Value for u8 {}
    /// impl_upcast!(dyn Value => u8);
    ///
    /// let narrow = OwningClonePtr::new(9u8);
    /// let wide = OwningClonePtr::<dyn Value>::cloned_from(&narrow);
    ///
    /// assert!(wide != narrow);
    /// assert_eq!(format!("{:?}", &*wide), "9");
    /// ```
    pub fn cloned_from<U>(src: &OwningClonePtr<U>) -> Self
    where
        U: Clone + Upcast<T> + 'static,
    {
        match &src.held {
            None => Self::null(),
            Some(held) => {
                let Held { ptr, .. } = held.duplicate();
                // SAFETY: `U` is sized, so the concrete type held by `src` is `U`
                // and the copy was allocated as a `Box<U>`.
                Self::from_box(unsafe { Box::from_raw(ptr.as_ptr()) })
            }
        }
    }

    /// Returns `true` if no pointee is held.
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.held.is_none()
    }

    /// Returns `true` if a pointee is held.
    #[inline]
    pub const fn is_some(&self) -> bool {
        self.held.is_some()
    }

    /// Returns a reference to the pointee, or `None` if null.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.held.as_ref().map(|held| {
            // SAFETY: the pointee lives as long as `self` holds it.
            unsafe { held.ptr.as_ref() }
        })
    }

    /// Returns a mutable reference to the pointee, or `None` if null.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.held.as_mut().map(|held| {
            // SAFETY: the pointee is owned exclusively by `self`.
            unsafe { held.ptr.as_mut() }
        })
    }

    /// Returns a reference to the pointee without checking for null.
    ///
    /// # Safety
    /// - `self` must not be null.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.held.is_some(), "`get_unchecked` on a null OwningClonePtr");
        // SAFETY: the caller guarantees a pointee is held.
        unsafe { self.held.as_ref().unwrap_unchecked().ptr.as_ref() }
    }

    /// Returns the raw pointer to the pointee, or `None` if null.
    #[inline]
    pub fn as_non_null(&self) -> Option<NonNull<T>> {
        self.held.as_ref().map(|held| held.ptr)
    }

    /// Name of the concrete type of the pointee, or `None` if null.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.held.as_ref().map(|held| held.cloner.type_name())
    }

    /// Drops the pointee, if any, and leaves the pointer null.
    #[inline]
    pub fn reset(&mut self) {
        if let Some(held) = self.held.take() {
            held.destroy();
        }
    }

    /// Drops the current pointee, then adopts `value` without cloning it.
    #[inline]
    pub fn reset_to<D>(&mut self, value: Box<D>)
    where
        D: Clone + Upcast<T> + 'static,
    {
        self.reset();
        self.held = Some(Held::adopt(value));
    }

    /// Drops the current pointee, then adopts `ptr` without cloning it.
    ///
    /// Passing the address already held does nothing, unless `D` is zero-sized:
    /// every `Box` of a zero-sized type has the same address, so `ptr` is then
    /// always adopted. A null `ptr` leaves the pointer null.
    ///
    /// # Safety
    /// - `ptr` must be null or come from [`Box::<D>::into_raw`].
    /// - If `D` is not zero-sized, `ptr` may also be the address already held.
    pub unsafe fn reset_raw<D>(&mut self, ptr: *mut D)
    where
        D: Clone + Upcast<T> + 'static,
    {
        if !ptr.is_null() && size_of::<D>() != 0 && ptr::addr_eq(self.addr(), ptr.cast_const()) {
            log::warn!("reset to the pointee already held by OwningClonePtr<{}>", type_name::<T>());
            return;
        }
        self.reset();
        if let Some(ptr) = NonNull::new(ptr) {
            // SAFETY: the caller guarantees `ptr` came from `Box::<D>::into_raw`.
            self.held = Some(Held::adopt(unsafe { Box::from_raw(ptr.as_ptr()) }));
        }
    }

    /// Drops the current pointee, then deep-copies the one of `src`.
    ///
    /// A null `src` leaves `self` null.
    #[inline]
    pub fn assign_from<U>(&mut self, src: &OwningClonePtr<U>)
    where
        U: Clone + Upcast<T> + 'static,
    {
        self.reset();
        *self = Self::cloned_from(src);
    }

    /// Drops the current pointee, then holds a clone of `value`.
    #[inline]
    pub fn assign_ref<D>(&mut self, value: &D)
    where
        D: Clone + Upcast<T> + 'static,
    {
        self.reset();
        *self = Self::from_ref(value);
    }

    /// Clones the value behind `ptr`, then drops the current pointee and holds
    /// the clone.
    ///
    /// The clone is made first, so `ptr` may point into the current pointee.
    /// Passing the address already held does nothing, unless `D` is zero-sized.
    /// A null `ptr` leaves the pointer null.
    ///
    /// # Safety
    /// - `ptr` must be null or [convertible to a reference](core::ptr#pointer-to-reference-conversion).
    pub unsafe fn assign_const_ptr<D>(&mut self, ptr: *const D)
    where
        D: Clone + Upcast<T> + 'static,
    {
        if !ptr.is_null() && size_of::<D>() != 0 && ptr::addr_eq(self.addr(), ptr) {
            return;
        }
        // SAFETY: see function docs. The current pointee is still alive here.
        let copy = unsafe { Self::from_const_ptr(ptr) };
        self.reset();
        *self = copy;
    }

    /// Exchanges the pointees and capabilities of two pointers.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.held, &mut other.held);
    }

    /// Releases the pointee as a `Box<T>`, or `None` if null.
    #[inline]
    pub fn into_box(self) -> Option<Box<T>> {
        let mut this = ManuallyDrop::new(self);
        this.held.take().map(|held| {
            // SAFETY: `ptr` was leaked from a `Box<T>` on adoption.
            unsafe { Box::from_raw(held.ptr.as_ptr()) }
        })
    }

    /// Same pointee as `other`. Zero-sized pointees are told apart by instance.
    fn same_pointee<U: ?Sized + 'static>(&self, other: &OwningClonePtr<U>) -> bool {
        match (&self.held, &other.held) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                if !ptr::addr_eq(a.ptr.as_ptr(), b.ptr.as_ptr()) {
                    return false;
                }
                // SAFETY: the pointee lives as long as `self` holds it.
                let size = size_of_val(unsafe { a.ptr.as_ref() });
                size != 0 || ptr::addr_eq(self, other)
            }
            _ => false,
        }
    }

    #[inline]
    fn addr(&self) -> *const () {
        match &self.held {
            Some(held) => held.ptr.as_ptr().cast_const().cast(),
            None => ptr::null(),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn null_deref() -> ! {
    panic!("dereferenced a null OwningClonePtr");
}

impl<T: ?Sized + 'static> Deref for OwningClonePtr<T> {
    type Target = T;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => null_deref(),
        }
    }
}

impl<T: ?Sized + 'static> DerefMut for OwningClonePtr<T> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Some(value) => value,
            None => null_deref(),
        }
    }
}

// -----------------------------------------------------------------------------
// Comparison

impl<T: ?Sized + 'static, U: ?Sized + 'static> PartialEq<OwningClonePtr<U>> for OwningClonePtr<T> {
    #[inline]
    fn eq(&self, other: &OwningClonePtr<U>) -> bool {
        self.same_pointee(other)
    }
}

impl<T: ?Sized + 'static> Eq for OwningClonePtr<T> {}

/// Address comparison. A zero-sized pointee compares equal to any pointer
/// carrying the same dangling address.
impl<T: ?Sized + 'static, U: ?Sized> PartialEq<*const U> for OwningClonePtr<T> {
    #[inline]
    fn eq(&self, other: &*const U) -> bool {
        ptr::addr_eq(self.addr(), *other)
    }
}

impl<T: ?Sized + 'static, U: ?Sized> PartialEq<*mut U> for OwningClonePtr<T> {
    #[inline]
    fn eq(&self, other: &*mut U) -> bool {
        ptr::addr_eq(self.addr(), other.cast_const())
    }
}

// -----------------------------------------------------------------------------
// Formatting

impl<T: ?Sized + 'static> fmt::Pointer for OwningClonePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.addr(), f)
    }
}

impl<T: ?Sized + fmt::Debug + 'static> fmt::Debug for OwningClonePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(held) = &self.held else {
            return f.write_str("OwningClonePtr(null)");
        };
        // SAFETY: the pointee lives as long as `self` holds it.
        let value = unsafe { held.ptr.as_ref() };

        let mut s = f.debug_struct("OwningClonePtr");
        s.field("value", &value);
        #[cfg(all(feature = "debug", debug_assertions))]
        s.field("type", &held.cloner.type_name());
        s.finish()
    }
}
