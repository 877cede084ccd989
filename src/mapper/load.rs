//! Node → object.
//!
//! Loading only touches fields the node has data for. Collections are the
//! exception: a collection field is always cleared and refilled, so a node
//! without the field leaves it empty.

use std::any::Any;

use crate::node::Node;

use super::context::Mapper;
use super::describe::{CollectionOps, OptionalOps, Shape, TypeInfo};
use super::error::MappingError;
use super::persist::Persist;

impl Mapper<'_> {
    /// Overwrite the fields of `object` with data from `node`.
    pub fn load_from_node<T: Persist>(&mut self, object: &mut T, node: &Node) {
        self.load_fields(object, node);
    }

    /// Build a `T` from its default and load `node` into it.
    pub fn from_node<T: Persist + Default>(&mut self, node: &Node) -> T {
        let mut object = T::default();
        self.load_fields(&mut object, node);
        object
    }

    pub(crate) fn load_fields<T: Persist>(&mut self, object: &mut T, node: &Node) {
        for field in T::fields() {
            self.enter(field.name());
            let ty = field.type_info();
            let slot = field.get_mut(object);

            if field.is_readonly() && !ty.is_vacant(slot) {
                if node.has_field(field.name()) {
                    self.report(MappingError::ReadonlyField {
                        field: field.name(),
                    });
                }
            } else if let Err(e) = self.load_slot(slot, &ty, node, field.name()) {
                self.report(e);
            }
            self.leave();
        }
    }

    /// Load field `name` of `node` into `slot`. `Ok(true)` if `slot` changed.
    fn load_slot(
        &mut self,
        slot: &mut dyn Any,
        ty: &TypeInfo,
        node: &Node,
        name: &str,
    ) -> Result<bool, MappingError> {
        match ty.shape() {
            Shape::Scalar => match node.value(name) {
                Some(text) => self.parse_scalar(slot, ty, text).map(|()| true),
                None => Ok(false),
            },
            Shape::Object(ops) => match node.node(name) {
                Some(child) => {
                    (ops.load)(slot, child, self);
                    Ok(true)
                }
                None => Ok(false),
            },
            Shape::Collection(ops) => self.load_collection(slot, ty, &ops, node, name),
            Shape::Optional(ops) => self.load_optional(slot, &ops, node, name),
        }
    }

    fn load_optional(
        &mut self,
        slot: &mut dyn Any,
        ops: &OptionalOps,
        node: &Node,
        name: &str,
    ) -> Result<bool, MappingError> {
        let inner = (ops.inner)();
        if let Some(current) = (ops.get_mut)(slot) {
            return self.load_slot(current, &inner, node, name);
        }

        // Collections load even when the field is missing, so an absent
        // optional collection becomes present and empty.
        if !inner.is_collection() && !node.has_field(name) {
            return Ok(false);
        }

        let mut value = inner
            .construct()
            .ok_or(MappingError::ConstructionFailed {
                type_name: inner.name(),
            })?;
        let loaded = self.load_slot(&mut *value, &inner, node, name)?;
        if loaded {
            (ops.set)(slot, value);
        }
        Ok(loaded)
    }

    fn load_collection(
        &mut self,
        slot: &mut dyn Any,
        ty: &TypeInfo,
        ops: &CollectionOps,
        node: &Node,
        name: &str,
    ) -> Result<bool, MappingError> {
        let element = (ops.element)();
        if element.is_collection() {
            return Err(MappingError::NestedCollection {
                type_name: ty.name(),
            });
        }
        if !element.can_construct() {
            return Err(MappingError::ConstructionFailed {
                type_name: element.name(),
            });
        }

        (ops.clear)(slot);

        if element.is_object() {
            for (index, child) in node.nodes(name).iter().enumerate() {
                let mut holder = Node::new();
                holder.add_node(name, child.clone());
                self.push_element(slot, ops, &element, &holder, name, index);
            }
        } else {
            for (index, text) in node.values(name).iter().enumerate() {
                let holder = Node::single_value(name, text.as_str());
                self.push_element(slot, ops, &element, &holder, name, index);
            }
        }
        Ok(true)
    }

    /// Load one element from a single-entry `holder` and append it.
    fn push_element(
        &mut self,
        slot: &mut dyn Any,
        ops: &CollectionOps,
        element: &TypeInfo,
        holder: &Node,
        name: &str,
        index: usize,
    ) {
        self.enter_index(index);
        match self.load_element(element, holder, name) {
            Ok(Some(value)) => {
                (ops.push)(slot, value);
            }
            Ok(None) => {}
            Err(e) => self.report(e),
        }
        self.leave();
    }

    fn load_element(
        &mut self,
        element: &TypeInfo,
        holder: &Node,
        name: &str,
    ) -> Result<Option<Box<dyn Any>>, MappingError> {
        let mut value = element
            .construct()
            .ok_or(MappingError::ConstructionFailed {
                type_name: element.name(),
            })?;
        let loaded = self.load_slot(&mut *value, element, holder, name)?;
        Ok(loaded.then_some(value))
    }
}
