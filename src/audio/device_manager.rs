use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

pub struct AudioDeviceManager {
    host: Host,
}

impl AudioDeviceManager {
    pub fn new() -> anyhow::Result<Self> {
        let manager = AudioDeviceManager {
            host: cpal::default_host(),
        };

        if let Err(e) = manager.log_devices() {
            log::error!("Failed to enumerate audio devices: {}", e);
            return Err(anyhow::anyhow!("Failed to enumerate audio devices: {}", e));
        }

        Ok(manager)
    }

    /// Enumerates the output devices once so startup logs show what is available.
    pub fn log_devices(&self) -> anyhow::Result<()> {
        let devices = self.host.output_devices().map_err(|e| {
            log::error!("Failed to enumerate output devices: {}", e);
            anyhow::anyhow!("Failed to enumerate output devices: {}", e)
        })?;

        let mut count = 0;
        for device in devices {
            match device.name() {
                Ok(name) => {
                    log::debug!("Found audio output device: {}", name);
                    count += 1;
                }
                Err(e) => log::warn!("Failed to get device name: {}", e),
            }
        }

        log::info!("Enumerated {} audio output devices", count);
        Ok(())
    }

    /// Looks up an output device by name, falling back to the default device.
    pub fn get_device_by_name(&self, name: &str) -> anyhow::Result<Device> {
        let devices = self.host.output_devices().map_err(|e| {
            log::error!("Failed to enumerate devices when searching for '{}': {}", name, e);
            anyhow::anyhow!("Failed to enumerate devices: {}", e)
        })?;

        for device in devices {
            if device.name().map_or(false, |device_name| device_name == name) {
                return Ok(device);
            }
        }

        log::warn!("Audio device '{}' not found, falling back to default", name);
        self.get_default_device()
    }

    pub fn get_default_device(&self) -> anyhow::Result<Device> {
        self.host.default_output_device().ok_or_else(|| {
            log::error!("No default audio output device available");
            anyhow::anyhow!("No default audio output device available")
        })
    }
}
