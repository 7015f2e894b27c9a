use std::fmt;

/// Adapter identity plus the limits worth knowing when something fails
/// to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSummary {
    pub name: String,
    pub backend: String,
    pub device_type: String,
    pub driver: String,
    pub driver_info: String,
    pub max_texture_dimension_2d: u32,
    pub max_bind_groups: u32,
    pub max_vertex_buffers: u32,
    pub max_vertex_attributes: u32,
    pub max_buffer_size: u64,
}

impl AdapterSummary {
    pub fn new(info: &wgpu::AdapterInfo, limits: &wgpu::Limits) -> Self {
        Self {
            name: info.name.clone(),
            backend: info.backend.to_str().to_string(),
            device_type: format!("{:?}", info.device_type),
            driver: info.driver.clone(),
            driver_info: info.driver_info.clone(),
            max_texture_dimension_2d: limits.max_texture_dimension_2d,
            max_bind_groups: limits.max_bind_groups,
            max_vertex_buffers: limits.max_vertex_buffers,
            max_vertex_attributes: limits.max_vertex_attributes,
            max_buffer_size: limits.max_buffer_size,
        }
    }

    pub fn from_adapter(adapter: &wgpu::Adapter) -> Self {
        Self::new(&adapter.get_info(), &adapter.limits())
    }
}

impl fmt::Display for AdapterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Adapter: {} ({}, {})", self.name, self.backend, self.device_type)?;
        if self.driver.is_empty() && self.driver_info.is_empty() {
            writeln!(f, "Driver: unknown")?;
        } else {
            writeln!(f, "Driver: {} {}", self.driver, self.driver_info)?;
        }
        writeln!(f, "Max texture size: {}", self.max_texture_dimension_2d)?;
        writeln!(f, "Max bind groups: {}", self.max_bind_groups)?;
        writeln!(
            f,
            "Max vertex buffers/attributes: {}/{}",
            self.max_vertex_buffers, self.max_vertex_attributes
        )?;
        write!(f, "Max buffer size: {} MiB", self.max_buffer_size / (1024 * 1024))
    }
}

/// Log adapter and limit details at startup.
pub fn log_adapter_info(adapter: &wgpu::Adapter) -> AdapterSummary {
    let summary = AdapterSummary::from_adapter(adapter);
    tracing::info!(
        "GPU: {} | backend {} | {}",
        summary.name,
        summary.backend,
        summary.device_type
    );
    tracing::info!("Driver: {} {}", summary.driver, summary.driver_info);
    tracing::debug!(
        max_texture_dimension_2d = summary.max_texture_dimension_2d,
        max_bind_groups = summary.max_bind_groups,
        max_vertex_buffers = summary.max_vertex_buffers,
        max_vertex_attributes = summary.max_vertex_attributes,
        max_buffer_size = summary.max_buffer_size,
        "device limits"
    );
    summary
}

/// Route device errors nobody caught in a scope to the log.
pub fn install_error_logger(device: &wgpu::Device) {
    device.on_uncaptured_error(Box::new(|err| {
        tracing::error!("GPU error: {err}");
    }));
}
