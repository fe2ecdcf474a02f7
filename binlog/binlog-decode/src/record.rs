//! Fixed-layout records decoded in a single read.
//!
//! A [`LayoutPlan`] is derived once per distinct descriptor list and cached in
//! a [`LayoutCache`]. Descriptors are immutable values and the cache is keyed
//! by the list's contents, so a changed shape is simply a different entry.
//! Entries only leave the cache through [`LayoutCache::evict`] or
//! [`LayoutCache::clear`].

use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use binlog_core::{DecodeError, Record, Value};
use bytes::{Buf, Bytes};
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    decoder::{FieldDecoder, check_uint_width, sign_extend, unpack_uint},
    stream::ByteStream,
};

/// How the bytes of one record field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFormat {
    /// Little-endian unsigned integer (1, 2, 3, 4, 6 or 8 bytes).
    UInt,
    /// Little-endian two's-complement integer (1, 2, 3, 4, 6 or 8 bytes).
    Int,
    /// 4-byte IEEE float.
    Float,
    /// 8-byte IEEE double.
    Double,
    /// Raw bytes of any length.
    Bytes,
}

/// One named fixed-width field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: Arc<str>,
    format: FieldFormat,
    len: usize,
}

impl FieldDescriptor {
    pub fn new(name: impl AsRef<str>, format: FieldFormat, len: usize) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            format,
            len,
        }
    }

    pub fn uint(name: impl AsRef<str>, width: usize) -> Self {
        Self::new(name, FieldFormat::UInt, width)
    }

    pub fn int(name: impl AsRef<str>, width: usize) -> Self {
        Self::new(name, FieldFormat::Int, width)
    }

    pub fn float(name: impl AsRef<str>) -> Self {
        Self::new(name, FieldFormat::Float, 4)
    }

    pub fn double(name: impl AsRef<str>) -> Self {
        Self::new(name, FieldFormat::Double, 8)
    }

    pub fn bytes(name: impl AsRef<str>, len: usize) -> Self {
        Self::new(name, FieldFormat::Bytes, len)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> FieldFormat {
        self.format
    }

    pub fn byte_len(&self) -> usize {
        self.len
    }

    fn validate(&self) -> Result<(), DecodeError> {
        let ok = match self.format {
            FieldFormat::UInt | FieldFormat::Int => check_uint_width(self.len).is_ok(),
            FieldFormat::Float => self.len == 4,
            FieldFormat::Double => self.len == 8,
            FieldFormat::Bytes => true,
        };
        if ok {
            Ok(())
        } else {
            Err(DecodeError::InvalidDescriptor {
                name: self.name.to_string(),
                detail: format!("{:?} field cannot be {} bytes", self.format, self.len),
            })
        }
    }

    fn unpack(&self, buf: &mut Bytes) -> Value {
        match self.format {
            FieldFormat::UInt => Value::from_uint(self.len, unpack_uint(buf, self.len)),
            FieldFormat::Int => Value::I64(sign_extend(unpack_uint(buf, self.len), self.len)),
            FieldFormat::Float => Value::F32(buf.get_f32_le()),
            FieldFormat::Double => Value::F64(buf.get_f64_le()),
            FieldFormat::Bytes => Value::Bytes(buf.split_to(self.len)),
        }
    }
}

/// Validated field list plus the total byte length it occupies.
#[derive(Debug)]
pub struct LayoutPlan {
    fields: Arc<[FieldDescriptor]>,
    total_len: usize,
}

impl LayoutPlan {
    pub fn new(fields: impl Into<Arc<[FieldDescriptor]>>) -> Result<Self, DecodeError> {
        let fields = fields.into();
        let mut total_len: usize = 0;
        for field in fields.iter() {
            field.validate()?;
            total_len = total_len.checked_add(field.len).ok_or_else(|| {
                DecodeError::InvalidDescriptor {
                    name: field.name.to_string(),
                    detail: "record length overflows usize".to_string(),
                }
            })?;
        }
        Ok(Self { fields, total_len })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Split one bulk read into per-field values, in descriptor order.
    fn unpack(&self, mut buf: Bytes) -> Record {
        let mut record = Record::with_capacity(self.fields.len());
        for field in self.fields.iter() {
            record.push(Arc::clone(&field.name), field.unpack(&mut buf));
        }
        record
    }
}

/// Memoized [`LayoutPlan`]s keyed by descriptor list.
#[derive(Debug, Default)]
pub struct LayoutCache {
    plans: RwLock<HashMap<Arc<[FieldDescriptor]>, Arc<LayoutPlan>>>,
}

static GLOBAL_LAYOUTS: LazyLock<Arc<LayoutCache>> =
    LazyLock::new(|| Arc::new(LayoutCache::new()));

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by decoders built without an explicit one.
    pub fn global() -> Arc<LayoutCache> {
        Arc::clone(&GLOBAL_LAYOUTS)
    }

    /// Cached plan for `fields`, computing and inserting it on first use.
    pub fn plan(&self, fields: &[FieldDescriptor]) -> Result<Arc<LayoutPlan>, DecodeError> {
        if let Some(plan) = self.plans.read().get(fields) {
            return Ok(Arc::clone(plan));
        }
        let plan = Arc::new(LayoutPlan::new(fields)?);
        debug!(
            fields = fields.len(),
            total_len = plan.total_len,
            "computed record layout plan"
        );
        let mut plans = self.plans.write();
        let entry = plans
            .entry(Arc::clone(&plan.fields))
            .or_insert_with(|| Arc::clone(&plan));
        Ok(Arc::clone(entry))
    }

    /// Drop the plan for `fields`. Returns whether an entry existed.
    pub fn evict(&self, fields: &[FieldDescriptor]) -> bool {
        let removed = self.plans.write().remove(fields).is_some();
        if removed {
            debug!(fields = fields.len(), "evicted record layout plan");
        }
        removed
    }

    pub fn clear(&self) {
        self.plans.write().clear();
    }

    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.read().is_empty()
    }
}

/// A descriptor list planned up front, for hot loops that decode the same
/// record shape repeatedly without a cache lookup.
#[derive(Debug, Clone)]
pub struct RecordShape {
    plan: Arc<LayoutPlan>,
}

impl RecordShape {
    pub fn new(fields: impl Into<Arc<[FieldDescriptor]>>) -> Result<Self, DecodeError> {
        Ok(Self {
            plan: Arc::new(LayoutPlan::new(fields)?),
        })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        self.plan.fields()
    }

    pub fn byte_len(&self) -> usize {
        self.plan.total_len()
    }
}

impl<S: ByteStream> FieldDecoder<S> {
    /// Decode a record described by `fields`, consuming exactly the sum of
    /// their lengths in one read.
    pub fn decode_record(&mut self, fields: &[FieldDescriptor]) -> Result<Record, DecodeError> {
        let plan = self.layout_cache().plan(fields)?;
        self.decode_planned(&plan)
    }

    pub fn decode_shape(&mut self, shape: &RecordShape) -> Result<Record, DecodeError> {
        self.decode_planned(&shape.plan)
    }

    fn decode_planned(&mut self, plan: &LayoutPlan) -> Result<Record, DecodeError> {
        let buf = self.read_bytes(plan.total_len)?;
        Ok(plan.unpack(buf))
    }
}
